//! Upload pipeline and session state
//!
//! Sequences the two backend calls, normalizes the payload, builds the
//! graph, and applies the resulting session. A monotonic attempt id is
//! compared at the point of applying a response, so a stale, slower
//! response never overwrites a newer session. Starting a new upload
//! does not cancel the one already in flight.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use tracing::{debug, info};

use crate::backend::{BackendClient, BackendError, BackendResult, KeywordSummary};
use crate::document::{DocumentSession, SourceId};
use crate::graph::build_graph;

/// Where the most recent upload attempt currently stands.
///
/// Linear sequence Idle → Uploading → GraphFetching → Ready, with a
/// jump to Failed from either in-flight stage. Ready and Failed are
/// terminal for the attempt; the next upload restarts the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingStage {
    Idle,
    Uploading,
    GraphFetching,
    Ready,
    Failed(String),
}

impl ProcessingStage {
    /// User-facing status label for the stage.
    pub fn status_text(&self) -> &str {
        match self {
            Self::Idle => "",
            Self::Uploading => "Uploading…",
            Self::GraphFetching => "Building graph…",
            Self::Ready => "Ready",
            Self::Failed(message) => message,
        }
    }

    /// True once the attempt can make no further progress.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed(_))
    }
}

#[derive(Debug)]
struct SessionState {
    stage: ProcessingStage,
    session: Option<DocumentSession>,
}

/// The upload pipeline: owns session state and the backend handle.
///
/// All mutation goes through attempt-guarded transitions; readers get
/// cloned snapshots, never references into live state.
pub struct DocumentPipeline {
    backend: Arc<dyn BackendClient>,
    attempts: AtomicU64,
    state: Mutex<SessionState>,
    summaries: DashMap<String, KeywordSummary>,
}

impl DocumentPipeline {
    /// Create a pipeline over the given backend.
    pub fn new(backend: Arc<dyn BackendClient>) -> Self {
        Self {
            backend,
            attempts: AtomicU64::new(0),
            state: Mutex::new(SessionState {
                stage: ProcessingStage::Idle,
                session: None,
            }),
            summaries: DashMap::new(),
        }
    }

    /// Current stage of the most recent attempt.
    pub fn stage(&self) -> ProcessingStage {
        self.state.lock().unwrap().stage.clone()
    }

    /// The session from the most recent successfully applied attempt.
    pub fn session(&self) -> Option<DocumentSession> {
        self.state.lock().unwrap().session.clone()
    }

    /// Run one upload attempt end to end.
    ///
    /// The two network calls are awaited in strict sequence: the graph
    /// fetch never starts before the upload completes. The built
    /// session is returned to the caller and applied to pipeline state
    /// unless a newer attempt started while this one was in flight;
    /// stale results (and stale failures) are discarded at the apply
    /// point.
    pub async fn process_upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> BackendResult<DocumentSession> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        self.transition(attempt, ProcessingStage::Uploading);

        let receipt = match self.backend.upload(file_name, bytes).await {
            Ok(receipt) => receipt,
            Err(err) => {
                self.transition(attempt, ProcessingStage::Failed(err.to_string()));
                return Err(err);
            }
        };

        self.transition(attempt, ProcessingStage::GraphFetching);

        let payload = match self.backend.fetch_graph(&receipt.source_id).await {
            Ok(payload) => payload,
            Err(err) => {
                self.transition(attempt, ProcessingStage::Failed(err.to_string()));
                return Err(err);
            }
        };

        let graph = build_graph(&payload.chunks, &payload.keywords);
        let session =
            DocumentSession::new(receipt.source_id, receipt.filename, payload.chunks, graph);

        self.apply(attempt, session.clone());
        Ok(session)
    }

    /// Summary text for one keyword, cached per keyword id.
    ///
    /// Repeat lookups are served from the cache without another
    /// backend call, mirroring the backend's own memoization. The
    /// cache is cleared whenever a new session is applied.
    pub async fn keyword_summary(
        &self,
        source_id: &SourceId,
        keyword_id: &str,
    ) -> BackendResult<KeywordSummary> {
        if let Some(hit) = self.summaries.get(keyword_id) {
            return Ok(hit.clone());
        }

        let summary = self.backend.fetch_summary(source_id, keyword_id).await?;
        self.summaries
            .insert(keyword_id.to_string(), summary.clone());
        Ok(summary)
    }

    /// Download the summary archive for a source into `dir`, written
    /// as `source_{source_id}_summaries.zip`. Returns the written path.
    pub async fn save_summary_archive(
        &self,
        source_id: &SourceId,
        dir: &Path,
    ) -> BackendResult<PathBuf> {
        let bytes = self.backend.fetch_summary_archive(source_id).await?;
        let path = dir.join(format!("source_{}_summaries.zip", source_id));
        std::fs::write(&path, bytes).map_err(|e| BackendError::DownloadFailed(e.to_string()))?;
        Ok(path)
    }

    /// Update the stage, unless a newer attempt has started.
    fn transition(&self, attempt: u64, stage: ProcessingStage) {
        if attempt != self.attempts.load(Ordering::SeqCst) {
            debug!("ignoring stage update from superseded attempt {}", attempt);
            return;
        }
        self.state.lock().unwrap().stage = stage;
    }

    /// Apply a completed session, unless a newer attempt has started.
    /// A failed or stale attempt leaves the prior session untouched.
    fn apply(&self, attempt: u64, session: DocumentSession) {
        if attempt != self.attempts.load(Ordering::SeqCst) {
            info!("discarding stale result from superseded attempt {}", attempt);
            return;
        }
        let mut state = self.state.lock().unwrap();
        state.stage = ProcessingStage::Ready;
        state.session = Some(session);
        // Summaries belong to the replaced source.
        self.summaries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{GraphPayload, MockBackend, UploadReceipt};
    use crate::document::{Chunk, Keyword};
    use std::time::Duration;

    fn receipt(file_name: &str, source_id: &str) -> UploadReceipt {
        UploadReceipt {
            filename: file_name.to_string(),
            source_id: SourceId::from_string(source_id),
            status: "success".to_string(),
        }
    }

    fn payload() -> GraphPayload {
        GraphPayload {
            chunks: vec![Chunk::new("a", "t1", 0), Chunk::new("b", "t2", 1)],
            keywords: vec![Keyword::new("k1", "Graphs", 2)
                .with_chunk_ids(vec!["a".into(), "z".into()])],
        }
    }

    // === Scenario: Successful upload reaches Ready with a session ===
    #[tokio::test]
    async fn successful_upload_reaches_ready() {
        let backend = MockBackend::new()
            .with_upload("paper.pdf", Ok(receipt("paper.pdf", "7")))
            .with_graph("7", Ok(payload()));
        let pipeline = DocumentPipeline::new(Arc::new(backend));

        let session = pipeline
            .process_upload("paper.pdf", b"%PDF".to_vec())
            .await
            .unwrap();

        assert_eq!(session.filename, "paper.pdf");
        assert_eq!(session.source_id.as_str(), "7");
        assert_eq!(session.chunks.len(), 2);
        // 2 chunk nodes + 1 topic; the stale "z" reference dropped.
        assert_eq!(session.graph.nodes.len(), 3);
        assert_eq!(session.graph.links.len(), 1);

        assert_eq!(pipeline.stage(), ProcessingStage::Ready);
        assert!(pipeline.stage().is_terminal());
        assert_eq!(pipeline.session().unwrap().filename, "paper.pdf");
    }

    // === Scenario: Upload endpoint failure transitions to Failed,
    // session stays empty ===
    #[tokio::test]
    async fn upload_failure_leaves_session_untouched() {
        let backend = MockBackend::new().with_upload(
            "paper.pdf",
            Err(BackendError::UploadFailed("backend returned 500".to_string())),
        );
        let pipeline = DocumentPipeline::new(Arc::new(backend));

        let err = pipeline
            .process_upload("paper.pdf", Vec::new())
            .await
            .unwrap_err();

        assert!(matches!(err, BackendError::UploadFailed(_)));
        assert!(err.to_string().starts_with("upload failed"));
        assert!(pipeline.session().is_none());
        assert!(matches!(pipeline.stage(), ProcessingStage::Failed(_)));
    }

    // === Scenario: Graph fetch failure transitions to Failed without
    // clobbering a prior session ===
    #[tokio::test]
    async fn graph_fetch_failure_keeps_prior_session() {
        let backend = MockBackend::new()
            .with_upload("first.pdf", Ok(receipt("first.pdf", "1")))
            .with_graph("1", Ok(payload()))
            .with_upload("second.pdf", Ok(receipt("second.pdf", "2")))
            .with_graph(
                "2",
                Err(BackendError::GraphFetchFailed("backend returned 502".to_string())),
            );
        let pipeline = DocumentPipeline::new(Arc::new(backend));

        pipeline
            .process_upload("first.pdf", Vec::new())
            .await
            .unwrap();
        let err = pipeline
            .process_upload("second.pdf", Vec::new())
            .await
            .unwrap_err();

        assert!(matches!(err, BackendError::GraphFetchFailed(_)));
        assert!(matches!(pipeline.stage(), ProcessingStage::Failed(_)));
        // The first session survives the second attempt's failure.
        assert_eq!(pipeline.session().unwrap().filename, "first.pdf");
    }

    // === Scenario: A stale, slower response never overwrites a newer
    // session ===
    #[tokio::test]
    async fn stale_response_is_discarded() {
        let backend = MockBackend::new()
            .with_upload_after(
                "slow.pdf",
                Duration::from_millis(80),
                Ok(receipt("slow.pdf", "1")),
            )
            .with_graph("1", Ok(payload()))
            .with_upload("fast.pdf", Ok(receipt("fast.pdf", "2")))
            .with_graph("2", Ok(payload()));
        let pipeline = Arc::new(DocumentPipeline::new(Arc::new(backend)));

        let slow = {
            let pipeline = pipeline.clone();
            tokio::spawn(async move { pipeline.process_upload("slow.pdf", Vec::new()).await })
        };
        // Let the slow attempt claim its id and park in the backend.
        tokio::time::sleep(Duration::from_millis(10)).await;

        pipeline
            .process_upload("fast.pdf", Vec::new())
            .await
            .unwrap();

        // The slow attempt still completes its own work...
        let stale = slow.await.unwrap().unwrap();
        assert_eq!(stale.filename, "slow.pdf");

        // ...but only the newer attempt's result was applied.
        assert_eq!(pipeline.session().unwrap().filename, "fast.pdf");
        assert_eq!(pipeline.stage(), ProcessingStage::Ready);
    }

    // === Scenario: A stale failure cannot clobber a newer attempt ===
    #[tokio::test]
    async fn stale_failure_is_discarded() {
        let backend = MockBackend::new()
            .with_upload_after(
                "slow.pdf",
                Duration::from_millis(80),
                Err(BackendError::UploadFailed("backend returned 500".to_string())),
            )
            .with_upload("fast.pdf", Ok(receipt("fast.pdf", "2")))
            .with_graph("2", Ok(payload()));
        let pipeline = Arc::new(DocumentPipeline::new(Arc::new(backend)));

        let slow = {
            let pipeline = pipeline.clone();
            tokio::spawn(async move { pipeline.process_upload("slow.pdf", Vec::new()).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        pipeline
            .process_upload("fast.pdf", Vec::new())
            .await
            .unwrap();
        assert!(slow.await.unwrap().is_err());

        // The stale failure did not move the pipeline out of Ready.
        assert_eq!(pipeline.stage(), ProcessingStage::Ready);
        assert_eq!(pipeline.session().unwrap().filename, "fast.pdf");
    }

    // === Scenario: Summary lookups hit the backend once per keyword ===
    #[tokio::test]
    async fn summary_cache_serves_repeat_lookups() {
        let backend = Arc::new(MockBackend::new().with_summary(
            "10",
            Ok(KeywordSummary {
                keyword: Keyword::new("10", "Graphs", 2),
                summary: "Central concept.".to_string(),
            }),
        ));
        let pipeline = DocumentPipeline::new(backend.clone());
        let source = SourceId::from_string("7");

        let first = pipeline.keyword_summary(&source, "10").await.unwrap();
        let second = pipeline.keyword_summary(&source, "10").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(backend.summary_call_count(), 1);
    }

    // === Scenario: Archive lands on disk under the expected name ===
    #[tokio::test]
    async fn archive_download_writes_expected_filename() {
        let backend = MockBackend::new().with_archive("7", Ok(b"PK\x03\x04".to_vec()));
        let pipeline = DocumentPipeline::new(Arc::new(backend));
        let dir = tempfile::tempdir().unwrap();

        let path = pipeline
            .save_summary_archive(&SourceId::from_string("7"), dir.path())
            .await
            .unwrap();

        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            "source_7_summaries.zip"
        );
        assert_eq!(std::fs::read(&path).unwrap(), b"PK\x03\x04");
    }

    // === Scenario: Stage labels follow the linear sequence ===
    #[test]
    fn stage_labels() {
        assert_eq!(ProcessingStage::Idle.status_text(), "");
        assert_eq!(ProcessingStage::Uploading.status_text(), "Uploading…");
        assert_eq!(ProcessingStage::GraphFetching.status_text(), "Building graph…");
        assert_eq!(ProcessingStage::Ready.status_text(), "Ready");
        assert_eq!(
            ProcessingStage::Failed("upload failed: 500".to_string()).status_text(),
            "upload failed: 500"
        );
        assert!(!ProcessingStage::Uploading.is_terminal());
        assert!(ProcessingStage::Failed(String::new()).is_terminal());
    }
}
