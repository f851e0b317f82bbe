//! Error types for SumScan
//!
//! This module defines all error types used throughout the application,
//! providing detailed error information for debugging and user feedback.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for SumScan operations
#[derive(Error, Debug)]
pub enum SumScanError {
    /// I/O error while opening or mapping the input
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file not found
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// Zero-length input buffer
    #[error("Empty source: refusing to hash a zero-length buffer")]
    EmptySource,

    /// No algorithm was requested
    #[error("Empty request: at least one algorithm must be selected")]
    EmptyRequest,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Report serialization error
    #[error("Report error: {0}")]
    Report(String),
}

impl SumScanError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this error means the input could not be read at all
    pub fn is_input_unavailable(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::NotFound(_))
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } | Self::NotFound(path) => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for SumScan operations
pub type Result<T> = std::result::Result<T, SumScanError>;

impl From<serde_json::Error> for SumScanError {
    fn from(err: serde_json::Error) -> Self {
        SumScanError::Report(err.to_string())
    }
}

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| SumScanError::io(path, e))
    }
}
