//! HTTP client for the document analysis service.

use crate::error::SdkError;
use crate::service::{ChatAnswer, DocumentService, UploadFile, UploadReceipt};
use crate::wire::{ChatRequest, ChatResponse, NodeClusterRecord, TripleRecord, UploadResponse};
use docgraph_domain::{project, ClusterAssignment, ClusterMap, DocumentKind, Projection, Triple};
use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// docgraph SDK client
///
/// Every call is a single round trip. No retries, no backoff.
#[derive(Debug, Clone)]
pub struct DocGraphClient {
    base_url: String,
    http: reqwest::Client,
}

impl DocGraphClient {
    /// Create a client for the service at `base_url` (no request timeout)
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Create a client whose requests fail after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, SdkError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Service base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Liveness probe against `GET /`
    pub async fn health(&self) -> Result<(), SdkError> {
        let url = self.endpoint(&[])?;
        let response = self.http.get(url).send().await?;
        check_status(response).await?;
        Ok(())
    }

    /// Upload a CSV file
    pub async fn upload_csv(&self, file: &UploadFile) -> Result<UploadReceipt, SdkError> {
        self.upload_document(DocumentKind::Csv, file).await
    }

    /// Upload a PDF file
    pub async fn upload_pdf(&self, file: &UploadFile) -> Result<UploadReceipt, SdkError> {
        self.upload_document(DocumentKind::Pdf, file).await
    }

    /// Fetch triples and cluster assignments and project them into a graph
    pub async fn fetch_projection(&self, upload_id: &str) -> Result<Projection, SdkError> {
        let (triples, clusters) =
            tokio::try_join!(self.get_triples(upload_id), self.get_clusters(upload_id))?;
        let clusters: ClusterMap = clusters.into_iter().collect();
        Ok(project(&triples, &clusters))
    }

    async fn upload_document(
        &self,
        kind: DocumentKind,
        file: &UploadFile,
    ) -> Result<UploadReceipt, SdkError> {
        let (path, mime) = match kind {
            DocumentKind::Csv => ("upload-csv", "text/csv"),
            DocumentKind::Pdf => ("upload-pdf", "application/pdf"),
        };
        let url = self.endpoint(&[path])?;

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(mime)?;
        let form = Form::new().part("file", part);

        debug!(file = %file.file_name, bytes = file.bytes.len(), %kind, "Uploading document");
        let response = self.http.post(url).multipart(form).send().await?;
        let body: UploadResponse = read_json(response).await?;
        let receipt = UploadReceipt::from(body);

        info!(upload_id = %receipt.upload_id, %kind, "Upload accepted");
        Ok(receipt)
    }

    async fn post_question(
        &self,
        kind: DocumentKind,
        upload_id: &str,
        question: &str,
    ) -> Result<ChatAnswer, SdkError> {
        let path = match kind {
            DocumentKind::Csv => "chat",
            DocumentKind::Pdf => "chat-pdf",
        };
        let url = self.endpoint(&[path])?;

        let request = ChatRequest {
            question,
            upload_id,
        };

        debug!(%upload_id, %kind, "Sending question");
        let response = self.http.post(url).json(&request).send().await?;
        let body: ChatResponse = read_json(response).await?;
        Ok(body.into())
    }

    async fn get_triples(&self, upload_id: &str) -> Result<Vec<Triple>, SdkError> {
        let url = self.endpoint(&["graph", require_id(upload_id)?])?;
        let response = self.http.get(url).send().await?;
        let records: Vec<TripleRecord> = read_json(response).await?;
        debug!(%upload_id, count = records.len(), "Fetched triples");
        Ok(records.into_iter().map(Triple::from).collect())
    }

    async fn get_clusters(&self, upload_id: &str) -> Result<Vec<ClusterAssignment>, SdkError> {
        let url = self.endpoint(&["graph", "nodes", require_id(upload_id)?])?;
        let response = self.http.get(url).send().await?;
        let records: Vec<NodeClusterRecord> = read_json(response).await?;
        debug!(%upload_id, count = records.len(), "Fetched cluster assignments");
        Ok(records.into_iter().map(ClusterAssignment::from).collect())
    }

    /// Base URL with `segments` appended as percent-encoded path segments
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SdkError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SdkError::InvalidInput(format!("Invalid base URL '{}': {}", self.base_url, e)))?;
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                SdkError::InvalidInput(format!("Base URL '{}' cannot have a path", self.base_url))
            })?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }
}

impl DocumentService for DocGraphClient {
    async fn upload(&self, kind: DocumentKind, file: &UploadFile) -> Result<UploadReceipt, SdkError> {
        self.upload_document(kind, file).await
    }

    async fn ask(
        &self,
        kind: DocumentKind,
        upload_id: &str,
        question: &str,
    ) -> Result<ChatAnswer, SdkError> {
        self.post_question(kind, upload_id, question).await
    }

    async fn fetch_triples(&self, upload_id: &str) -> Result<Vec<Triple>, SdkError> {
        self.get_triples(upload_id).await
    }

    async fn fetch_clusters(&self, upload_id: &str) -> Result<Vec<ClusterAssignment>, SdkError> {
        self.get_clusters(upload_id).await
    }
}

fn require_id(upload_id: &str) -> Result<&str, SdkError> {
    if upload_id.is_empty() {
        return Err(SdkError::InvalidInput("upload id must not be empty".to_string()));
    }
    Ok(upload_id)
}

async fn check_status(response: Response) -> Result<Response, SdkError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(SdkError::Http {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, SdkError> {
    let response = check_status(response).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let client = DocGraphClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");

        let url = client.endpoint(&["graph", "nodes", "42"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/graph/nodes/42");
    }

    #[test]
    fn test_endpoint_keeps_base_path_and_encodes() {
        let client = DocGraphClient::new("http://example.com/api");
        let url = client.endpoint(&["graph", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "http://example.com/api/graph/a%20b%2Fc");
    }

    #[test]
    fn test_invalid_base_url() {
        let client = DocGraphClient::new("not a url");
        assert!(matches!(client.endpoint(&["chat"]), Err(SdkError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_id_rejected() {
        assert!(require_id("").is_err());
        assert_eq!(require_id("9").unwrap(), "9");
    }
}
