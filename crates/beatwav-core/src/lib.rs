//! beatwav core
//!
//! Turns a measured tempo into a click track: a mono 16-bit PCM WAV file with
//! a short full-scale click at every beat, for use as a sync reference.
//!
//! # Overview
//!
//! A [`BeatSpec`] describes the measurement (`clicks` recorded over
//! `elapsed_seconds`) and the track to build (`base_beats`, each split into
//! `subdivision` equally spaced clicks). [`click::render`] places the clicks
//! into a [`PcmBuffer`] at 44100 Hz and the [`wav`] module serializes it with
//! the canonical 44-byte header.
//!
//! # Determinism
//!
//! Rendering is a pure function of the [`BeatSpec`]. Identical inputs produce
//! byte-identical files; only the file name, taken from a caller-owned
//! [`FileCounter`], differs.
//!
//! # Example
//!
//! ```no_run
//! use beatwav_core::{BeatSpec, Encoder, FileCounter};
//!
//! let spec = BeatSpec::new(4, 2.0, 4, 1)?;
//! let mut counter = FileCounter::new();
//! let report = Encoder::new(".").encode(&spec, &mut counter)?;
//!
//! println!("{} ({} samples)", report.path.display(), report.num_samples);
//! # Ok::<(), beatwav_core::EncodeError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`beat`] - Validated beat parameters
//! - [`click`] - Click placement into a sample buffer
//! - [`encoder`] - File naming and writing
//! - [`wav`] - Canonical WAV writer

pub mod beat;
pub mod click;
pub mod encoder;
pub mod error;
pub mod wav;

// Re-export main types at crate root
pub use beat::BeatSpec;
pub use click::{
    find_click_onsets, render, PcmBuffer, CLICK_AMPLITUDE, CLICK_LENGTH_SAMPLES, SAMPLE_RATE,
};
pub use encoder::{encode, file_name, to_wav_bytes, EncodeReport, Encoder, FileCounter};
pub use error::{EncodeError, EncodeResult};
