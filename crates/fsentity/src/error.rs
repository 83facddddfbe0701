//! Error types for entity operations.

use std::io;
use thiserror::Error;

/// Errors raised by mutating operations and invalid arguments.
///
/// Probes (`writable`, `deletable`, `locked`, ...) never produce these; they
/// answer `false` instead.
#[derive(Debug, Error)]
pub enum FsError {
    /// Argument rejected before touching the filesystem.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The write backend refused or failed a mutation.
    #[error("write failed for {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    /// The write backend is configured read-only.
    #[error("backend is read-only: {0}")]
    ReadOnly(String),

    /// File or directory not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FsError {
    /// Create an InvalidArgument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a WriteFailed error.
    pub fn write_failed(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::WriteFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a ReadOnly error.
    pub fn read_only(path: impl Into<String>) -> Self {
        Self::ReadOnly(path.into())
    }

    /// Create a NotFound error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound(path.into())
    }
}

/// Convert FsError to std::io::Error for compatibility.
impl From<FsError> for io::Error {
    fn from(e: FsError) -> Self {
        match e {
            FsError::InvalidArgument(msg) => io::Error::new(io::ErrorKind::InvalidInput, msg),
            FsError::WriteFailed { path, reason } => {
                io::Error::other(format!("write failed for {path}: {reason}"))
            }
            FsError::ReadOnly(msg) => io::Error::new(io::ErrorKind::PermissionDenied, msg),
            FsError::NotFound(msg) => io::Error::new(io::ErrorKind::NotFound, msg),
            FsError::Config(e) => io::Error::new(io::ErrorKind::InvalidData, e),
            FsError::Io(e) => e,
        }
    }
}

/// Entity result type.
pub type FsResult<T> = Result<T, FsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_failed_message() {
        let err = FsError::write_failed("/srv/a.po", "permission denied");
        assert_eq!(err.to_string(), "write failed for /srv/a.po: permission denied");
    }

    #[test]
    fn test_io_conversion_kinds() {
        let io_err: io::Error = FsError::invalid_argument("empty path").into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);

        let io_err: io::Error = FsError::read_only("/srv").into();
        assert_eq!(io_err.kind(), io::ErrorKind::PermissionDenied);

        let io_err: io::Error = FsError::not_found("/nope").into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
    }
}
