//! Error types for the capture archive library.

use std::path::PathBuf;
use thiserror::Error;

use crate::archive::ArchiveSourceType;

/// Main error type for archive operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No backend is registered for the path's extension
    #[error("No archive backend registered for: {0}")]
    UnsupportedExtension(PathBuf),

    /// Container magic mismatch or truncated header
    #[error("Invalid capture container: bad or missing header")]
    InvalidHeader,

    /// File to open does not exist
    #[error("Capture file not found: {0}")]
    SourceMissing(PathBuf),

    /// Wrong number or kind of sources for the requested source type
    #[error("Malformed {source_type} source set: {reason}")]
    MalformedSourceSet {
        source_type: ArchiveSourceType,
        reason: String,
    },

    /// Backend cannot export this source type
    #[error("{backend} archive does not support {source_type} sources")]
    UnsupportedSourceType {
        backend: &'static str,
        source_type: ArchiveSourceType,
    },

    /// Operation exists in the contract but has no implementation
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    /// File selection was dismissed
    #[error("File selection cancelled")]
    Cancelled,

    /// Cell-grid sink failure
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (settings, capture documents, workbooks)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create a malformed source set error.
    pub fn malformed(source_type: ArchiveSourceType, reason: impl Into<String>) -> Self {
        Self::MalformedSourceSet {
            source_type,
            reason: reason.into(),
        }
    }
}

/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::malformed(ArchiveSourceType::Node, "expected 1 source, got 0");
        let msg = e.to_string();
        assert!(msg.contains("Node"));
        assert!(msg.contains("got 0"));

        let e = Error::UnsupportedSourceType {
            backend: "csv",
            source_type: ArchiveSourceType::Group,
        };
        assert!(e.to_string().contains("csv"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
