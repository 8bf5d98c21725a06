//! Backend access layer
//!
//! The document pipeline talks to the processing backend through the
//! `BackendClient` trait so transports stay swappable:
//! - `HttpBackend`: reqwest against the real service (production)
//! - `MockBackend`: scripted responses (testing)

mod http;
mod mock;
pub(crate) mod wire;

pub use http::{HttpBackend, DEFAULT_BASE_URL};
pub use mock::MockBackend;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{Chunk, Keyword, SourceId};

/// Errors from backend operations.
///
/// Each variant renders one user-facing message. The client does not
/// distinguish transient from permanent failures and never retries.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("upload failed: {0}")]
    UploadFailed(String),

    #[error("graph fetch failed: {0}")]
    GraphFetchFailed(String),

    #[error("summary fetch failed: {0}")]
    SummaryFetchFailed(String),

    #[error("download failed: {0}")]
    DownloadFailed(String),
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Acknowledgement returned by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Filename as recorded by the backend
    pub filename: String,
    /// Identifier assigned to the uploaded source
    pub source_id: SourceId,
    /// Backend-reported processing status
    pub status: String,
}

/// The graph resource for one source, normalized into the canonical
/// data model at the wire boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphPayload {
    pub chunks: Vec<Chunk>,
    pub keywords: Vec<Keyword>,
}

/// A keyword together with its generated summary text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSummary {
    pub keyword: Keyword,
    pub summary: String,
}

/// Client trait for the document-processing backend.
///
/// Implementations return canonical types; backend field-name and
/// id-shape quirks are absorbed in `wire` before anything crosses this
/// boundary.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// POST the file to the upload endpoint.
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> BackendResult<UploadReceipt>;

    /// GET the chunk/keyword graph resource for a source.
    async fn fetch_graph(&self, source_id: &SourceId) -> BackendResult<GraphPayload>;

    /// GET the generated summary for one keyword of a source.
    async fn fetch_summary(
        &self,
        source_id: &SourceId,
        keyword_id: &str,
    ) -> BackendResult<KeywordSummary>;

    /// GET the zip archive of all keyword summaries for a source.
    async fn fetch_summary_archive(&self, source_id: &SourceId) -> BackendResult<Vec<u8>>;
}
