// Lexicon scorer: the normalize -> tokenize -> join -> sum pipeline.

use tracing::{debug, enabled, info, Level};

use super::document::Document;
use super::lexicon::Lexicon;
use super::polarity::{compose_polarity, tokenize, PolarityResult};
use super::traits::SentimentScorer;
use crate::error::Result;

/// Scores documents by summing the lexicon polarity of their words.
///
/// Holds the lexicon by value; share one scorer across batches rather than
/// reloading the lexicon for each.
pub struct LexiconScorer {
    lexicon: Lexicon,
}

impl LexiconScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, documents: &[Document]) -> Result<PolarityResult> {
        // Documents that already carry cleaned text are used as-is; the
        // caller's raw input is never modified.
        let cleaned: Vec<_> = documents
            .iter()
            .map(|doc| {
                let doc = doc.clone().normalized();
                (doc.id, doc.cleaned_text.unwrap_or_default())
            })
            .collect();

        if enabled!(Level::DEBUG) {
            let (tokens, matched) = cleaned.iter().fold((0usize, 0usize), |(t, m), (_, text)| {
                let toks = tokenize(text);
                let hits = toks.iter().filter(|tok| self.lexicon.contains(tok.word)).count();
                (t + toks.len(), m + hits)
            });
            debug!(tokens, matched, "Joined tokens against lexicon");
        }

        let result = compose_polarity(cleaned, &self.lexicon);

        info!(
            documents = documents.len(),
            scored = result.len(),
            "Composed document polarity"
        );
        Ok(result)
    }
}
