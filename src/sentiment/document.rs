// Documents: the typed boundary between fetched records and the scorer.
//
// Fetchers hand back loosely-shaped JSON records (tweets, CKAN rows). Before
// scoring, each record is adapted into a Document carrying an id and the
// raw text, with everything else kept as passthrough metadata.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SentimentError};

/// A flat key-value record as returned by a fetcher or read from disk.
pub type Record = Map<String, Value>;

/// Unique identifier of a document; the grouping key for polarity sums.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for DocumentId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One analyzed unit of text: a post, a survey answer, an event listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub raw_text: String,
    /// Set once by the normalizer; `None` until then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaned_text: Option<String>,
    /// Fields of the source record other than the id and text.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Record,
}

impl Document {
    pub fn new(id: impl Into<DocumentId>, raw_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            raw_text: raw_text.into(),
            cleaned_text: None,
            metadata: Map::new(),
        }
    }

    /// Return this document with `cleaned_text` filled in.
    ///
    /// An already-normalized document is returned unchanged.
    pub fn normalized(mut self) -> Self {
        if self.cleaned_text.is_none() {
            self.cleaned_text = Some(super::normalize::clean_text(&self.raw_text));
        }
        self
    }

    /// Adapt a flat record into a document.
    ///
    /// `index` is the record's position in its batch and only feeds the
    /// error message. The id may be a non-empty string or a number. The text
    /// may be a string, number, or boolean; scalars are scored as their JSON
    /// spelling. Absent, null, array, and object values count as missing.
    pub fn from_record(
        record: &Record,
        id_field: &str,
        text_field: &str,
        index: usize,
    ) -> Result<Self> {
        let missing = |field: &str| SentimentError::MissingField {
            field: field.to_string(),
            index,
        };

        let id = match record.get(id_field) {
            Some(Value::String(s)) if !s.is_empty() => DocumentId::from(s.as_str()),
            Some(Value::Number(n)) => DocumentId::from(n.to_string()),
            _ => return Err(missing(id_field)),
        };

        let raw_text = match record.get(text_field) {
            Some(Value::String(s)) => s.clone(),
            Some(scalar @ (Value::Number(_) | Value::Bool(_))) => scalar.to_string(),
            _ => return Err(missing(text_field)),
        };

        let metadata = record
            .iter()
            .filter(|(k, _)| k.as_str() != id_field && k.as_str() != text_field)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Self {
            id,
            raw_text,
            cleaned_text: None,
            metadata,
        })
    }
}

/// Adapt a whole batch of records. The first malformed record fails the
/// batch; no document is silently dropped.
pub fn documents_from_records(
    records: &[Record],
    id_field: &str,
    text_field: &str,
) -> Result<Vec<Document>> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| Document::from_record(r, id_field, text_field, i))
        .collect()
}
