use std::io;
use thiserror::Error;

/// Result type for path operations
pub type Result<T> = std::result::Result<T, PathError>;

/// Unified error type for all path operations
#[derive(Debug, Error)]
pub enum PathError {
    // Query errors
    #[error("Path does not exist: {0}")]
    PathDoesNotExist(String),

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Not a zip archive: {0}")]
    NotAnArchive(String),

    // Archive errors
    #[error("Invalid or missing password for archive entry: {0}")]
    InvalidPassword(String),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PathError {
    /// Map a filesystem error for `path`, folding `NotFound` into `PathDoesNotExist`
    pub(crate) fn from_io(err: io::Error, path: &str) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            PathError::PathDoesNotExist(path.to_string())
        } else {
            PathError::Io(err)
        }
    }

    /// True for the absent-entry kind
    pub fn is_not_found(&self) -> bool {
        matches!(self, PathError::PathDoesNotExist(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_folded() {
        let err = PathError::from_io(io::Error::from(io::ErrorKind::NotFound), "bogus");
        assert!(matches!(err, PathError::PathDoesNotExist(ref p) if p == "bogus"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_other_io_errors_propagate() {
        let err = PathError::from_io(io::Error::from(io::ErrorKind::PermissionDenied), "x");
        assert!(matches!(err, PathError::Io(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_display() {
        let err = PathError::NotSupported("atime inside archive".to_string());
        assert_eq!(err.to_string(), "Not supported: atime inside archive");
    }
}
