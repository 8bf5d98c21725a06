//! Production backend transport over HTTP

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::document::SourceId;

use super::wire::{RawGraphPayload, RawSummary, RawUploadReceipt};
use super::{
    BackendClient, BackendError, BackendResult, GraphPayload, KeywordSummary, UploadReceipt,
};

/// Default backend address for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// HTTP implementation of `BackendClient`.
///
/// No retry on any failure; timeouts are left to reqwest's transport
/// defaults, which is a known gap.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client against `base_url` (trailing slash tolerated).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl BackendClient for HttpBackend {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> BackendResult<UploadReceipt> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/upload-pdf/"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| BackendError::UploadFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BackendError::UploadFailed(format!(
                "backend returned {}",
                response.status()
            )));
        }

        let raw: RawUploadReceipt = response
            .json()
            .await
            .map_err(|e| BackendError::UploadFailed(e.to_string()))?;
        Ok(raw.normalize())
    }

    async fn fetch_graph(&self, source_id: &SourceId) -> BackendResult<GraphPayload> {
        let response = self
            .client
            .get(self.url(&format!("/sources/{}/graph/", source_id)))
            .send()
            .await
            .map_err(|e| BackendError::GraphFetchFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BackendError::GraphFetchFailed(format!(
                "backend returned {}",
                response.status()
            )));
        }

        let raw: RawGraphPayload = response
            .json()
            .await
            .map_err(|e| BackendError::GraphFetchFailed(e.to_string()))?;
        Ok(raw.normalize())
    }

    async fn fetch_summary(
        &self,
        source_id: &SourceId,
        keyword_id: &str,
    ) -> BackendResult<KeywordSummary> {
        let response = self
            .client
            .get(self.url(&format!("/sources/{}/summary/{}", source_id, keyword_id)))
            .send()
            .await
            .map_err(|e| BackendError::SummaryFetchFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BackendError::SummaryFetchFailed(format!(
                "backend returned {}",
                response.status()
            )));
        }

        let raw: RawSummary = response
            .json()
            .await
            .map_err(|e| BackendError::SummaryFetchFailed(e.to_string()))?;
        Ok(raw.normalize())
    }

    async fn fetch_summary_archive(&self, source_id: &SourceId) -> BackendResult<Vec<u8>> {
        let response = self
            .client
            .get(self.url(&format!("/sources/{}/summary_zip", source_id)))
            .send()
            .await
            .map_err(|e| BackendError::DownloadFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BackendError::DownloadFailed(format!(
                "backend returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::DownloadFailed(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
