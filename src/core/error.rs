//! Error types for the counting pipeline
//!
//! Only run-level failures live here. Per-file failures never become an
//! error: they are carried as [`FileCount::Failed`](crate::core::model::FileCount)
//! and contribute zero.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CountError {
    /// The target path is missing or is not a directory
    #[error("directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// The directory exists but could not be enumerated
    #[error("failed to list directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A fan-out task could not be joined outside of a per-file unit
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl CountError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CountError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_not_found_message() {
        let err = CountError::DirectoryNotFound {
            path: PathBuf::from("/no/such/dir"),
        };
        assert_eq!(err.to_string(), "directory not found: /no/such/dir");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CountError::io("corpus/test_0.txt", source);
        assert!(err.to_string().contains("corpus/test_0.txt"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
