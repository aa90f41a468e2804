//! beatwav End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the click-track flows:
//!
//! - Encoding: beat parameters -> numbered WAV files
//! - Validation: canonical 44-byte header and sample layout
//! - **Determinism**: byte-identical output across runs
//! - Session: scripted keypresses through the interactive flow
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p beatwav-tests
//! ```
//!
//! ## Determinism Testing
//!
//! ```rust,ignore
//! use beatwav_tests::determinism::verify_determinism;
//!
//! let spec = BeatSpec::new(4, 2.0, 4, 1)?;
//! let result = verify_determinism(|| to_wav_bytes(&render(&spec)), 3);
//! result.assert_deterministic();
//! ```

pub mod determinism;
pub mod fixtures;
pub mod format_validators;

// Re-export commonly used items
pub use determinism::{compute_hash, verify_determinism, DeterminismResult, DiffInfo};
pub use fixtures::{ReferenceCase, REFERENCE_CASES};
