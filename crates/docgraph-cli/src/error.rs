//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SDK error
    #[error("{0}")]
    Sdk(#[from] docgraph_sdk::SdkError),

    /// Controller rejected the request before sending it
    #[error("{0}")]
    Controller(#[from] docgraph_sdk::ControllerError),

    /// Invalid layout override in the configuration file
    #[error("Layout configuration error: {0}")]
    Layout(#[from] docgraph_domain::LayoutError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A request reached the service but did not succeed
    #[error("{0}")]
    Failed(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),

    /// An operation needs an uploaded document
    #[error("No document uploaded. Use 'upload <file>' first.")]
    NoDocument,
}
