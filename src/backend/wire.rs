//! Wire-format adapter for backend payloads
//!
//! The backend names fields in SCREAMING case and hands out numeric
//! ids; nothing outside this module ever sees those shapes. A payload
//! whose chunk or keyword collection is not an array is recovered by
//! logging and normalizing to an empty list — a partially broken graph
//! is more useful to the user than a crashed view.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::document::{Chunk, Keyword, SourceId};

use super::{GraphPayload, KeywordSummary, UploadReceipt};

/// An id the backend may send as either a number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawId {
    Int(i64),
    Text(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// Upload acknowledgement, backend shape.
#[derive(Debug, Deserialize)]
pub(crate) struct RawUploadReceipt {
    pub filename: String,
    pub source_id: RawId,
    #[serde(default)]
    pub status: String,
}

impl RawUploadReceipt {
    pub(crate) fn normalize(self) -> UploadReceipt {
        UploadReceipt {
            filename: self.filename,
            source_id: SourceId::from_string(self.source_id.into_string()),
            status: self.status,
        }
    }
}

/// Graph resource, backend shape. Collections are left untyped so a
/// malformed field degrades to an empty list instead of failing the
/// whole payload.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawGraphPayload {
    #[serde(default)]
    pub chunks: Value,
    #[serde(default)]
    pub keywords: Value,
}

impl RawGraphPayload {
    pub(crate) fn normalize(self) -> GraphPayload {
        GraphPayload {
            chunks: normalize_chunks(self.chunks),
            keywords: normalize_keywords(self.keywords),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawChunk {
    #[serde(rename = "ID")]
    pub id: RawId,
    #[serde(rename = "CHUNK_TEXT")]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawKeyword {
    #[serde(rename = "ID")]
    pub id: RawId,
    #[serde(rename = "SOURCE_ID")]
    pub source_id: RawId,
    #[serde(rename = "KEYWORD")]
    pub keyword: String,
    #[serde(rename = "INSTANCES")]
    pub instances: u32,
    #[serde(rename = "CHUNK_IDS", default)]
    pub chunk_ids: Vec<RawId>,
}

impl RawKeyword {
    pub(crate) fn normalize(self) -> Keyword {
        Keyword::new(self.id.into_string(), self.keyword, self.instances)
            .with_source_id(self.source_id.into_string())
            .with_chunk_ids(self.chunk_ids.into_iter().map(RawId::into_string).collect())
    }
}

/// Keyword summary response, backend shape.
#[derive(Debug, Deserialize)]
pub(crate) struct RawSummary {
    pub keyword: RawKeyword,
    pub summary: String,
}

impl RawSummary {
    pub(crate) fn normalize(self) -> KeywordSummary {
        KeywordSummary {
            keyword: self.keyword.normalize(),
            summary: self.summary,
        }
    }
}

/// Coerce the raw chunk collection into canonical chunks.
///
/// The backend sends no position field; `index` is assigned from array
/// position. A malformed record is skipped with a warning and leaves a
/// gap in the positional sequence, keeping labels stable for the
/// records around it.
fn normalize_chunks(raw: Value) -> Vec<Chunk> {
    let items = match raw {
        Value::Array(items) => items,
        Value::Null => return Vec::new(),
        _ => {
            warn!("graph payload 'chunks' is not an array, rendering an empty chunk set");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<RawChunk>(item) {
            Ok(raw) => Some(Chunk::new(raw.id.into_string(), raw.text, index)),
            Err(err) => {
                warn!("skipping malformed chunk record at index {}: {}", index, err);
                None
            }
        })
        .collect()
}

/// Coerce the raw keyword collection into canonical keywords.
fn normalize_keywords(raw: Value) -> Vec<Keyword> {
    let items = match raw {
        Value::Array(items) => items,
        Value::Null => return Vec::new(),
        _ => {
            warn!("graph payload 'keywords' is not an array, rendering an empty keyword set");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(
            |(index, item)| match serde_json::from_value::<RawKeyword>(item) {
                Ok(raw) => Some(raw.normalize()),
                Err(err) => {
                    warn!("skipping malformed keyword record at index {}: {}", index, err);
                    None
                }
            },
        )
        .collect()
}
