//! Binary format validators for test infrastructure.
//!
//! Parses WAV headers independently of the writer under test and returns
//! structured information about file contents.

use std::fmt;

mod wav;

// Re-export public types and functions
pub use wav::{validate_canonical_wav, validate_wav, WavInfo};

/// Error type for format validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    /// The format being validated.
    pub format: &'static str,
    /// Description of what went wrong.
    pub message: String,
    /// Byte offset where the error occurred, if applicable.
    pub offset: Option<usize>,
}

impl FormatError {
    /// Create a new format error.
    pub fn new(format: &'static str, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
            offset: None,
        }
    }

    /// Create a format error with a byte offset.
    pub fn at_offset(format: &'static str, message: impl Into<String>, offset: usize) -> Self {
        Self {
            format,
            message: message.into(),
            offset: Some(offset),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(offset) = self.offset {
            write!(
                f,
                "{} error at offset {}: {}",
                self.format, offset, self.message
            )
        } else {
            write!(f, "{} error: {}", self.format, self.message)
        }
    }
}

impl std::error::Error for FormatError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_display() {
        let err = FormatError::new("TEST", "something went wrong");
        assert_eq!(format!("{}", err), "TEST error: something went wrong");

        let err_offset = FormatError::at_offset("WAV", "bad header", 12);
        assert_eq!(
            format!("{}", err_offset),
            "WAV error at offset 12: bad header"
        );
    }
}
