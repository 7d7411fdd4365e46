// Unit tests for polarity aggregation and the lexicon scorer.
//
// Exercises tokenization, the lexicon join, per-document summation, and
// the coverage guarantee: one result entry per distinct document id.

use std::collections::HashSet;

use polarity_lab::sentiment::document::{Document, DocumentId};
use polarity_lab::sentiment::lexicon::Lexicon;
use polarity_lab::sentiment::normalize::clean_text;
use polarity_lab::sentiment::polarity::{compose_polarity, tokenize};
use polarity_lab::sentiment::scorer::LexiconScorer;
use polarity_lab::sentiment::traits::SentimentScorer;
use proptest::prelude::*;

fn lab_lexicon() -> Lexicon {
    Lexicon::from_pairs([("good", 1.5), ("bad", -2.0)])
}

// ============================================================
// Summation
// ============================================================

#[test]
fn good_bad_good_sums_to_one() {
    let cleaned = clean_text("good bad good");
    let result = compose_polarity([(DocumentId::from(1u64), cleaned)], &lab_lexicon());
    assert_eq!(result.len(), 1);
    assert_eq!(result.get(&DocumentId::from(1u64)), Some(1.0));
}

#[test]
fn mixed_case_scores_after_normalizing() {
    let cleaned = clean_text("GOOD Bad");
    assert_eq!(cleaned, "good bad");
    let result = compose_polarity([(DocumentId::from(7u64), cleaned)], &lab_lexicon());
    assert_eq!(result.get(&DocumentId::from(7u64)), Some(-0.5));
}

#[test]
fn bypassing_normalizer_scores_uppercase_as_zero() {
    let result = compose_polarity([(DocumentId::from("raw"), "GOOD BAD")], &lab_lexicon());
    assert_eq!(result.get(&DocumentId::from("raw")), Some(0.0));
}

#[test]
fn contraction_fragments_are_separate_tokens() {
    let lex = Lexicon::from_pairs([("don", -0.1), ("t", -0.1), ("stop", -0.5)]);
    let cleaned = clean_text("don't stop");
    let words: Vec<&str> = tokenize(&cleaned).iter().map(|t| t.word).collect();
    assert_eq!(words, vec!["don", "t", "stop"]);

    let result = compose_polarity([(DocumentId::from("c"), cleaned)], &lex);
    let score = result.get(&DocumentId::from("c")).unwrap();
    assert!((score - (-0.7)).abs() < 1e-12, "got {score}");
}

#[test]
fn score_is_a_raw_sum_not_an_average() {
    let result = compose_polarity(
        [
            (DocumentId::from("short"), "good"),
            (DocumentId::from("long"), "good good good good"),
        ],
        &lab_lexicon(),
    );
    assert_eq!(result.get(&DocumentId::from("short")), Some(1.5));
    assert_eq!(result.get(&DocumentId::from("long")), Some(6.0));
}

// ============================================================
// Zero baseline and coverage
// ============================================================

#[test]
fn empty_and_unmatched_documents_score_zero() {
    let docs = vec![
        (DocumentId::from("empty"), ""),
        (DocumentId::from("spaces"), "   \t "),
        (DocumentId::from("unknown"), "transit map"),
    ];
    let result = compose_polarity(docs, &lab_lexicon());
    assert_eq!(result.len(), 3);
    for (_, score) in result.iter() {
        assert_eq!(score, 0.0);
    }
}

#[test]
fn empty_batch_gives_empty_result() {
    let docs: Vec<(DocumentId, &str)> = Vec::new();
    assert!(compose_polarity(docs, &lab_lexicon()).is_empty());
}

#[test]
fn ranked_puts_most_negative_first() {
    let result = compose_polarity(
        [
            (DocumentId::from("a"), "good"),
            (DocumentId::from("b"), "bad"),
            (DocumentId::from("c"), ""),
        ],
        &lab_lexicon(),
    );
    let order: Vec<&str> = result.ranked().iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(order, vec!["b", "c", "a"]);
}

// ============================================================
// LexiconScorer
// ============================================================

#[test]
fn scorer_uses_existing_cleaned_text() {
    let scorer = LexiconScorer::new(lab_lexicon());
    let mut doc = Document::new("pre", "ignored raw text");
    doc.cleaned_text = Some("good good".to_string());
    let result = scorer.score(&[doc]).unwrap();
    assert_eq!(result.get(&DocumentId::from("pre")), Some(3.0));
}

#[test]
fn scorer_serializes_as_id_to_score_map() {
    let scorer = LexiconScorer::new(lab_lexicon());
    let docs = vec![Document::new(1u64, "good"), Document::new(2u64, "bad!")];
    let result = scorer.score(&docs).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    assert_eq!(json, r#"{"1":1.5,"2":-2.0}"#);
}

// ============================================================
// Properties
// ============================================================

proptest! {
    #[test]
    fn one_entry_per_distinct_id(
        docs in prop::collection::vec((0u64..20, "[a-z ]{0,30}"), 0..40)
    ) {
        let distinct: HashSet<u64> = docs.iter().map(|(id, _)| *id).collect();
        let input: Vec<(DocumentId, String)> = docs
            .into_iter()
            .map(|(id, text)| (DocumentId::from(id), text))
            .collect();
        let result = compose_polarity(input, &lab_lexicon());

        prop_assert_eq!(result.len(), distinct.len());
        for id in distinct {
            prop_assert!(result.get(&DocumentId::from(id)).is_some());
        }
    }

    #[test]
    fn words_outside_lexicon_score_zero(text in "[h-z ]{0,60}") {
        // "good" and "bad" both contain letters below h, so none can appear.
        let result = compose_polarity([(DocumentId::from("x"), text)], &lab_lexicon());
        prop_assert_eq!(result.get(&DocumentId::from("x")), Some(0.0));
    }
}
