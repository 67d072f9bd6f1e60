//! Error types for the docgraph SDK.

use thiserror::Error;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// Connection error (network, DNS, timeout, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// The service answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code
        status: u16,
        /// Response body text
        body: String,
    },

    /// Response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Any other request failure
    #[error("Request error: {0}")]
    Request(String),

    /// Invalid argument (bad URL, empty identifier, etc.)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Local I/O error (reading the file to upload)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            SdkError::Connection(e.to_string())
        } else if e.is_decode() {
            SdkError::Decode(e.to_string())
        } else if e.is_status() {
            match e.status() {
                Some(status) => SdkError::Http {
                    status: status.as_u16(),
                    body: e.to_string(),
                },
                None => SdkError::Request(e.to_string()),
            }
        } else {
            SdkError::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Decode(format!("JSON parsing error: {}", e))
    }
}

/// Errors raised synchronously by the controller before any request is made
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    /// No file, or an empty one, was selected
    #[error("No file selected")]
    NoFileSelected,

    /// The document kind could not be inferred from the file name
    #[error("Cannot tell whether '{0}' is a CSV or PDF file; pass the kind explicitly")]
    UnknownDocumentKind(String),
}
