//! JSON output types for machine-readable CLI output.
//!
//! Used by the `--json` flag on `bpm`, `tap` and `inspect`.

use beatwav_core::{EncodeError, EncodeReport};
use serde::{Deserialize, Serialize};

/// Error codes for CLI-level failures. Encoder failures keep their own codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// File is not a PCM WAV file
    pub const NOT_WAV: &str = "CLI_002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "ENC_001", "CLI_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Subdivision factor of the failed file (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdivision: Option<i64>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            subdivision: None,
        }
    }

    /// Creates an error from an encoder failure.
    pub fn from_encode(err: &EncodeError, subdivision: i64) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            subdivision: Some(subdivision),
        }
    }
}

/// Output of the `bpm` and `tap` commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    /// True if every requested file was written.
    pub ok: bool,
    /// Files written, in order.
    pub files: Vec<EncodeReport>,
    /// Failures, in order.
    pub errors: Vec<JsonError>,
}

/// Output of the `inspect` command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InspectOutput {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<WavSummary>,
    pub errors: Vec<JsonError>,
}

/// Header fields and click positions of a WAV file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WavSummary {
    pub path: String,
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub num_samples: usize,
    pub duration_seconds: f64,
    /// Sample offsets where clicks start.
    pub click_onsets: Vec<usize>,
    /// Tempo implied by the mean spacing of the clicks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_bpm: Option<f64>,
}
