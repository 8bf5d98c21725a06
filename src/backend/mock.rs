//! Scripted backend for testing — returns preconfigured responses.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::document::SourceId;

use super::{
    BackendClient, BackendError, BackendResult, GraphPayload, KeywordSummary, UploadReceipt,
};

/// A scripted response with an optional artificial delay.
#[derive(Debug, Clone)]
struct Scripted<T> {
    delay: Option<Duration>,
    result: BackendResult<T>,
}

impl<T> Scripted<T> {
    fn immediate(result: BackendResult<T>) -> Self {
        Self {
            delay: None,
            result,
        }
    }

    fn delayed(delay: Duration, result: BackendResult<T>) -> Self {
        Self {
            delay: Some(delay),
            result,
        }
    }
}

/// Mock backend keyed by request input: uploads by file name, graphs
/// and archives by source id, summaries by keyword id.
///
/// Per-response delays make overlapping-upload races reproducible in
/// tests. An unscripted request resolves to the matching failure
/// variant.
#[derive(Debug, Default)]
pub struct MockBackend {
    uploads: Mutex<HashMap<String, Scripted<UploadReceipt>>>,
    graphs: Mutex<HashMap<String, Scripted<GraphPayload>>>,
    summaries: Mutex<HashMap<String, Scripted<KeywordSummary>>>,
    archives: Mutex<HashMap<String, Scripted<Vec<u8>>>>,
    summary_calls: AtomicUsize,
}

impl MockBackend {
    /// Create a mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the upload response for a file name.
    pub fn with_upload(self, file_name: impl Into<String>, result: BackendResult<UploadReceipt>) -> Self {
        self.uploads
            .lock()
            .unwrap()
            .insert(file_name.into(), Scripted::immediate(result));
        self
    }

    /// Script a delayed upload response for a file name.
    pub fn with_upload_after(
        self,
        file_name: impl Into<String>,
        delay: Duration,
        result: BackendResult<UploadReceipt>,
    ) -> Self {
        self.uploads
            .lock()
            .unwrap()
            .insert(file_name.into(), Scripted::delayed(delay, result));
        self
    }

    /// Script the graph response for a source id.
    pub fn with_graph(self, source_id: impl Into<String>, result: BackendResult<GraphPayload>) -> Self {
        self.graphs
            .lock()
            .unwrap()
            .insert(source_id.into(), Scripted::immediate(result));
        self
    }

    /// Script the summary response for a keyword id.
    pub fn with_summary(
        self,
        keyword_id: impl Into<String>,
        result: BackendResult<KeywordSummary>,
    ) -> Self {
        self.summaries
            .lock()
            .unwrap()
            .insert(keyword_id.into(), Scripted::immediate(result));
        self
    }

    /// Script the archive response for a source id.
    pub fn with_archive(self, source_id: impl Into<String>, result: BackendResult<Vec<u8>>) -> Self {
        self.archives
            .lock()
            .unwrap()
            .insert(source_id.into(), Scripted::immediate(result));
        self
    }

    /// How many summary fetches actually reached the backend.
    pub fn summary_call_count(&self) -> usize {
        self.summary_calls.load(Ordering::SeqCst)
    }
}

async fn resolve<T: Clone>(scripted: Option<Scripted<T>>, missing: BackendError) -> BackendResult<T> {
    let scripted = match scripted {
        Some(s) => s,
        None => return Err(missing),
    };
    if let Some(delay) = scripted.delay {
        tokio::time::sleep(delay).await;
    }
    scripted.result
}

#[async_trait]
impl BackendClient for MockBackend {
    async fn upload(&self, file_name: &str, _bytes: Vec<u8>) -> BackendResult<UploadReceipt> {
        let scripted = self.uploads.lock().unwrap().get(file_name).cloned();
        resolve(
            scripted,
            BackendError::UploadFailed(format!("no scripted response for '{}'", file_name)),
        )
        .await
    }

    async fn fetch_graph(&self, source_id: &SourceId) -> BackendResult<GraphPayload> {
        let scripted = self.graphs.lock().unwrap().get(source_id.as_str()).cloned();
        resolve(
            scripted,
            BackendError::GraphFetchFailed(format!("no scripted response for '{}'", source_id)),
        )
        .await
    }

    async fn fetch_summary(
        &self,
        _source_id: &SourceId,
        keyword_id: &str,
    ) -> BackendResult<KeywordSummary> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.summaries.lock().unwrap().get(keyword_id).cloned();
        resolve(
            scripted,
            BackendError::SummaryFetchFailed(format!("no scripted response for '{}'", keyword_id)),
        )
        .await
    }

    async fn fetch_summary_archive(&self, source_id: &SourceId) -> BackendResult<Vec<u8>> {
        let scripted = self.archives.lock().unwrap().get(source_id.as_str()).cloned();
        resolve(
            scripted,
            BackendError::DownloadFailed(format!("no scripted response for '{}'", source_id)),
        )
        .await
    }
}
