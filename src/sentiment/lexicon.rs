// Sentiment lexicon: word -> polarity, loaded from a VADER-format file.
//
// Each line is tab-separated: word, mean polarity, standard deviation, and
// the raw rater scores. Only the first two columns are used.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{info, warn};

use crate::error::{Result, SentimentError};

/// A read-only mapping from word to polarity score.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, f64>,
    /// How many lines re-defined a word that was already present.
    overridden: usize,
}

impl Lexicon {
    /// Build a lexicon from `(word, polarity)` pairs. Later pairs win.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut lexicon = Self::default();
        for (word, polarity) in pairs {
            lexicon.insert(word.into(), polarity);
        }
        lexicon
    }

    /// Load a lexicon file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| SentimentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Self::from_reader(BufReader::new(file))?;

        info!(
            words = lexicon.len(),
            path = %path.display(),
            "Loaded sentiment lexicon"
        );
        Ok(lexicon)
    }

    /// Parse a lexicon from any line-oriented reader.
    ///
    /// Blank lines (empty or whitespace-only) carry no entry and are
    /// skipped. Any other line without a finite numeric second column is a
    /// fatal error: skipping it would quietly shift every score that uses
    /// the word.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lexicon = Self::default();

        for (i, line) in reader.lines().enumerate() {
            let line_no = i + 1;
            let line = line.map_err(|source| SentimentError::Read {
                line: line_no,
                source,
            })?;
            let line = line.strip_suffix('\r').unwrap_or(&line);
            if line.trim().is_empty() {
                continue;
            }

            let (word, polarity) = parse_line(line).ok_or_else(|| {
                SentimentError::MalformedLexiconEntry {
                    line: line_no,
                    content: line.to_string(),
                }
            })?;
            lexicon.insert(word.to_string(), polarity);
        }

        if lexicon.overridden > 0 {
            warn!(
                overridden = lexicon.overridden,
                "Lexicon defines some words more than once; the last definition wins"
            );
        }

        Ok(lexicon)
    }

    fn insert(&mut self, word: String, polarity: f64) {
        if self.entries.insert(word, polarity).is_some() {
            self.overridden += 1;
        }
    }

    /// Polarity for an exact (case-sensitive) word, if the lexicon has it.
    pub fn polarity(&self, word: &str) -> Option<f64> {
        self.entries.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that replaced an earlier definition of the same word.
    pub fn overridden_keys(&self) -> usize {
        self.overridden
    }
}

/// Split a lexicon line into its word and polarity.
fn parse_line(line: &str) -> Option<(&str, f64)> {
    let mut fields = line.split('\t');
    let word = fields.next()?;
    let polarity: f64 = fields.next()?.trim().parse().ok()?;
    polarity.is_finite().then_some((word, polarity))
}
