// Sentiment scorer trait: swap-ready abstraction.
//
// The lexicon scorer is the only implementation today. A model-based scorer
// could slot in behind the same interface without touching the CLI.

use super::document::Document;
use super::polarity::PolarityResult;
use crate::error::Result;

/// Trait for scoring a batch of documents into one polarity per id.
pub trait SentimentScorer {
    /// Score every document. The result holds one entry per distinct id.
    fn score(&self, documents: &[Document]) -> Result<PolarityResult>;
}
