//! Document kind - which family of endpoints a document is handled by

use std::fmt;
use std::path::Path;

/// Kind of an uploaded document
///
/// Selects the upload and chat endpoints. Only PDF documents have
/// extracted graph data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Comma-separated tabular data
    Csv,

    /// PDF document (text is extracted server-side)
    Pdf,
}

impl DocumentKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Csv => "csv",
            DocumentKind::Pdf => "pdf",
        }
    }

    /// Parse a kind from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(DocumentKind::Csv),
            "pdf" => Some(DocumentKind::Pdf),
            _ => None,
        }
    }

    /// Infer the kind from a file extension
    ///
    /// # Examples
    ///
    /// ```
    /// use docgraph_domain::DocumentKind;
    ///
    /// assert_eq!(DocumentKind::from_path("report.PDF"), Some(DocumentKind::Pdf));
    /// assert_eq!(DocumentKind::from_path("notes.txt"), None);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::parse)
    }

    /// Whether the service extracts a relation graph for this kind
    pub fn has_graph(&self) -> bool {
        matches!(self, DocumentKind::Pdf)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid document kind: {}", s))
    }
}
