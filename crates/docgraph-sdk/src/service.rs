//! The remote document service as seen by the controller.

use crate::error::SdkError;
use docgraph_domain::{ClusterAssignment, DocumentKind, Triple};
use std::path::Path;

/// A file selected for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name sent in the multipart form
    pub file_name: String,

    /// File contents
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Wrap in-memory contents
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk; the multipart file name is the path's last component
    pub async fn read(path: impl AsRef<Path>) -> Result<Self, SdkError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        Ok(Self { file_name, bytes })
    }

    /// Whether there is nothing to upload
    pub fn is_empty(&self) -> bool {
        self.file_name.trim().is_empty() || self.bytes.is_empty()
    }
}

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Human-readable status from the service
    pub message: String,

    /// Opaque handle for follow-up graph and chat requests
    pub upload_id: String,
}

/// Answer to a chat question
#[derive(Debug, Clone, PartialEq)]
pub struct ChatAnswer {
    /// Answer text
    pub answer: String,

    /// Server-side query time in seconds
    pub query_time: Option<f64>,

    /// Tokens consumed by the answer
    pub token_usage: Option<u64>,
}

/// Operations the controller needs from the remote service
///
/// Implemented over HTTP by [`crate::DocGraphClient`].
#[allow(async_fn_in_trait)]
pub trait DocumentService {
    /// Upload a document of the given kind
    async fn upload(&self, kind: DocumentKind, file: &UploadFile) -> Result<UploadReceipt, SdkError>;

    /// Ask a question about an uploaded document
    async fn ask(
        &self,
        kind: DocumentKind,
        upload_id: &str,
        question: &str,
    ) -> Result<ChatAnswer, SdkError>;

    /// Triples extracted from an uploaded document
    async fn fetch_triples(&self, upload_id: &str) -> Result<Vec<Triple>, SdkError>;

    /// Cluster assignment of every node of an uploaded document
    async fn fetch_clusters(&self, upload_id: &str) -> Result<Vec<ClusterAssignment>, SdkError>;
}
