// Polarity aggregation: tokenize, join against the lexicon, sum per document.
//
// Scores are raw sums of matched word polarities. They are not divided by
// document length, so a long rant scores further from zero than a short one.

use indexmap::IndexMap;
use serde::Serialize;

use super::document::DocumentId;
use super::lexicon::Lexicon;

/// A single whitespace-delimited word and its position in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub word: &'a str,
    pub position: usize,
}

/// Split cleaned text on runs of whitespace.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    text.split_whitespace()
        .enumerate()
        .map(|(position, word)| Token { word, position })
        .collect()
}

/// Per-document polarity, in order of first appearance of each id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PolarityResult {
    scores: IndexMap<DocumentId, f64>,
}

/// Aggregate statistics over a `PolarityResult`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolaritySummary {
    pub documents: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl PolarityResult {
    pub fn get(&self, id: &DocumentId) -> Option<f64> {
        self.scores.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DocumentId, f64)> {
        self.scores.iter().map(|(id, score)| (id, *score))
    }

    /// Documents sorted by score, most negative first.
    pub fn ranked(&self) -> Vec<(&DocumentId, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked
    }

    /// Mean, extremes, and sign counts. `None` for an empty result.
    pub fn summary(&self) -> Option<PolaritySummary> {
        if self.scores.is_empty() {
            return None;
        }

        let mut summary = PolaritySummary {
            documents: self.scores.len(),
            mean: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            positive: 0,
            negative: 0,
            neutral: 0,
        };
        let mut total = 0.0;
        for &score in self.scores.values() {
            total += score;
            summary.min = summary.min.min(score);
            summary.max = summary.max.max(score);
            if score > 0.0 {
                summary.positive += 1;
            } else if score < 0.0 {
                summary.negative += 1;
            } else {
                summary.neutral += 1;
            }
        }
        summary.mean = total / summary.documents as f64;
        Some(summary)
    }
}

impl IntoIterator for PolarityResult {
    type Item = (DocumentId, f64);
    type IntoIter = indexmap::map::IntoIter<DocumentId, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.scores.into_iter()
    }
}

/// Sum the lexicon polarity of every token in each document.
///
/// Tokens are matched case-sensitively; words missing from the lexicon add
/// nothing. Every id in the input appears in the result, with `0.0` when
/// nothing matched. Repeated ids are grouped into one entry.
pub fn compose_polarity<I, T>(documents: I, lexicon: &Lexicon) -> PolarityResult
where
    I: IntoIterator<Item = (DocumentId, T)>,
    T: AsRef<str>,
{
    let mut scores: IndexMap<DocumentId, f64> = IndexMap::new();

    for (id, cleaned) in documents {
        let matched: f64 = tokenize(cleaned.as_ref())
            .iter()
            .filter_map(|token| lexicon.polarity(token.word))
            .sum();
        *scores.entry(id).or_insert(0.0) += matched;
    }

    PolarityResult { scores }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::from_pairs([("good", 1.5), ("bad", -2.0)])
    }

    #[test]
    fn test_tokenize_positions() {
        let tokens = tokenize("  don t   stop ");
        let words: Vec<_> = tokens.iter().map(|t| t.word).collect();
        assert_eq!(words, vec!["don", "t", "stop"]);
        assert_eq!(tokens[2].position, 2);
        assert!(tokenize(" \t\n").is_empty());
    }

    #[test]
    fn test_sum_of_matched_words() {
        let result = compose_polarity([(DocumentId::from(1u64), "good bad good")], &lexicon());
        assert_eq!(result.get(&DocumentId::from(1u64)), Some(1.0));
    }

    #[test]
    fn test_unmatched_and_empty_score_zero() {
        let docs = vec![
            (DocumentId::from("a"), "nothing here"),
            (DocumentId::from("b"), ""),
        ];
        let result = compose_polarity(docs, &lexicon());
        assert_eq!(result.len(), 2);
        assert_eq!(result.get(&DocumentId::from("a")), Some(0.0));
        assert_eq!(result.get(&DocumentId::from("b")), Some(0.0));
    }

    #[test]
    fn test_case_is_not_folded() {
        let result = compose_polarity([(DocumentId::from("x"), "GOOD good")], &lexicon());
        assert_eq!(result.get(&DocumentId::from("x")), Some(1.5));
    }

    #[test]
    fn test_repeated_ids_are_grouped() {
        let docs = vec![
            (DocumentId::from("a"), "good"),
            (DocumentId::from("b"), "bad"),
            (DocumentId::from("a"), "good"),
        ];
        let result = compose_polarity(docs, &lexicon());
        assert_eq!(result.len(), 2);
        assert_eq!(result.get(&DocumentId::from("a")), Some(3.0));
        let order: Vec<_> = result.iter().map(|(id, _)| id.as_str().to_string()).collect();
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn test_summary_counts() {
        let docs = vec![
            (DocumentId::from("p"), "good"),
            (DocumentId::from("n"), "bad"),
            (DocumentId::from("z"), "meh"),
        ];
        let summary = compose_polarity(docs, &lexicon()).summary().unwrap();
        assert_eq!(summary.documents, 3);
        assert_eq!((summary.positive, summary.negative, summary.neutral), (1, 1, 1));
        assert_eq!(summary.min, -2.0);
        assert_eq!(summary.max, 1.5);
        assert!((summary.mean - (-0.5 / 3.0)).abs() < 1e-12);
        assert!(PolarityResult::default().summary().is_none());
    }
}
