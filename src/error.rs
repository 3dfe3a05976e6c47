//! hexbrain error types

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// hexbrain error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A document exists on disk but is not valid JSON for its record type
    #[error("Corrupt document {}: {reason}", .path.display())]
    CorruptDocument { path: PathBuf, reason: String },

    /// A document could not be written; the previous file is left as it was
    #[error("Failed to write {}: {reason}", .path.display())]
    WriteFailure {
        path: PathBuf,
        kind: ErrorKind,
        reason: String,
    },

    /// Free-text time input matched no recognized pattern
    #[error("{0}")]
    UnparseableTime(String),

    /// Export error
    #[error("Export error: {0}")]
    Export(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn corrupt(path: &Path, reason: impl ToString) -> Self {
        Self::CorruptDocument {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write_failure(path: &Path, kind: ErrorKind, reason: impl ToString) -> Self {
        Self::WriteFailure {
            path: path.to_path_buf(),
            kind,
            reason: reason.to_string(),
        }
    }

    /// Short notice suitable for a transient toast, naming the affected file
    pub fn record_notice(&self) -> String {
        match self {
            Self::CorruptDocument { path, .. } => format!("Invalid JSON: {}", file_label(path)),
            Self::WriteFailure {
                path,
                kind: ErrorKind::PermissionDenied,
                ..
            } => format!("Permission denied: {}", file_label(path)),
            Self::WriteFailure { path, .. } => format!("Save failed: {}", file_label(path)),
            other => other.to_string(),
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Result type alias for hexbrain operations
pub type Result<T> = std::result::Result<T, Error>;
