//! Error types for click-track encoding.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for encoding operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors that can occur while encoding a click track.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A beat parameter was zero, negative or not finite.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameters {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: String,
    },

    /// The output file could not be created or written.
    #[error("cannot write {}: {source}", path.display())]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl EncodeError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            name,
            message: message.into(),
        }
    }

    /// Creates an I/O error bound to the destination path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Stable error code for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            EncodeError::InvalidParameters { .. } => "ENC_001",
            EncodeError::Io { .. } => "ENC_002",
        }
    }

    /// Returns true for parameter validation failures.
    pub fn is_invalid_parameters(&self) -> bool {
        matches!(self, EncodeError::InvalidParameters { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_helper() {
        let err = EncodeError::invalid_param("clicks", "must be greater than zero");
        assert!(err.to_string().contains("clicks"));
        assert!(err.to_string().contains("greater than zero"));
        assert_eq!(err.code(), "ENC_001");
        assert!(err.is_invalid_parameters());
    }

    #[test]
    fn test_io_helper_mentions_path() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = EncodeError::io("/nowhere/output_1.wav", source);
        assert!(err.to_string().contains("output_1.wav"));
        assert!(err.to_string().contains("denied"));
        assert_eq!(err.code(), "ENC_002");
        assert!(!err.is_invalid_parameters());
    }
}
