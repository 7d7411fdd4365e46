// Typed errors for the sentiment core.
//
// The core reports load-time and shape failures as values the caller can
// match on. Network and file collaborators keep using anyhow with context.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used by the sentiment core.
pub type Result<T> = std::result::Result<T, SentimentError>;

/// Failures the sentiment core can report.
///
/// Unmatched tokens are not represented here: a word missing from the
/// lexicon contributes zero polarity and is never a fault.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// A non-blank lexicon line whose polarity field is absent or not a
    /// finite number. Blank lines are skipped, not reported.
    #[error("malformed lexicon entry on line {line}: {content:?}")]
    MalformedLexiconEntry { line: usize, content: String },

    /// An input record lacks the id or text field the scorer needs, or holds
    /// a null or structured value where a scalar is required.
    #[error("record {index} is missing field `{field}`")]
    MissingField { field: String, index: usize },

    /// The lexicon stream failed partway through.
    #[error("failed to read lexicon line {line}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// The lexicon file could not be opened.
    #[error("failed to read lexicon at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
