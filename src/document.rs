//! Canonical document-session data model
//!
//! Everything here is produced from one backend response, held for the
//! duration of the view, and replaced wholesale on the next upload.
//! Wire-format quirks never reach these types; see `backend::wire`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::graph::GraphData;

/// Identifier for an uploaded source document.
///
/// Serializes as a plain string. The backend hands out numeric ids;
/// they are coerced to strings at the wire boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    /// Create a SourceId from a string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SourceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SourceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An ordered fragment of the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique identifier within the source
    pub id: String,
    /// The fragment text
    pub text: String,
    /// Zero-based position within the document
    pub index: usize,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(id: impl Into<String>, text: impl Into<String>, index: usize) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            index,
        }
    }
}

/// A thematic concept extracted from the document, with the chunk ids
/// that mention it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    /// Unique identifier within the source
    pub id: String,
    /// Display text of the keyword
    pub keyword: String,
    /// How many times the keyword was observed in the document
    pub instances: u32,
    /// Source document this keyword belongs to
    pub source_id: String,
    /// Chunk ids that mention this keyword. May reference ids absent
    /// from the current chunk set (stale or cross-document); the graph
    /// builder filters those out.
    pub chunk_ids: Vec<String>,
}

impl Keyword {
    /// Create a new keyword with no chunk references
    pub fn new(id: impl Into<String>, keyword: impl Into<String>, instances: u32) -> Self {
        Self {
            id: id.into(),
            keyword: keyword.into(),
            instances,
            source_id: String::new(),
            chunk_ids: Vec::new(),
        }
    }

    /// Set the owning source id
    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = source_id.into();
        self
    }

    /// Set the referenced chunk ids
    pub fn with_chunk_ids(mut self, chunk_ids: Vec<String>) -> Self {
        self.chunk_ids = chunk_ids;
        self
    }
}

/// Session state for one successfully processed upload.
///
/// Owned by the pipeline and replaced atomically when a newer upload
/// completes; never mutated in place while a renderer reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSession {
    /// Backend-assigned source identifier
    pub source_id: SourceId,
    /// Original filename as uploaded
    pub filename: String,
    /// Ordered document fragments
    pub chunks: Vec<Chunk>,
    /// The bipartite graph built from this session's chunks and keywords
    pub graph: GraphData,
    /// When the session was created
    pub created_at: DateTime<Utc>,
}

impl DocumentSession {
    /// Assemble a session from a completed upload attempt
    pub fn new(
        source_id: SourceId,
        filename: impl Into<String>,
        chunks: Vec<Chunk>,
        graph: GraphData,
    ) -> Self {
        Self {
            source_id,
            filename: filename.into(),
            chunks,
            graph,
            created_at: Utc::now(),
        }
    }
}
