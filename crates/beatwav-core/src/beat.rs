//! Beat timing parameters.
//!
//! A [`BeatSpec`] is the validated input to the encoder: how many clicks were
//! recorded over how many seconds, how many base beats the track spans, and how
//! many equally spaced clicks to place inside each base beat.

use serde::{Deserialize, Serialize};

use crate::click::SAMPLE_RATE;
use crate::error::{EncodeError, EncodeResult};
use crate::wav::HEADER_SIZE;

/// Seconds of recording that a manually entered BPM stands for.
pub const BPM_WINDOW_SECONDS: f64 = 60.0;

/// Validated beat timing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeatSpec {
    /// Number of clicks recorded.
    pub clicks: u32,
    /// Seconds elapsed while the clicks were recorded.
    pub elapsed_seconds: f64,
    /// Number of base beats in the output track.
    pub base_beats: u32,
    /// Clicks per base beat.
    pub subdivision: u32,
}

impl BeatSpec {
    /// Validates raw parameters and builds a spec.
    ///
    /// Every value must be strictly positive; `elapsed_seconds` must also be
    /// finite. The resulting track must fit in a single WAV data chunk.
    pub fn new(
        clicks: i64,
        elapsed_seconds: f64,
        base_beats: i64,
        subdivision: i64,
    ) -> EncodeResult<Self> {
        let clicks = positive_count("clicks", clicks)?;
        if !elapsed_seconds.is_finite() || elapsed_seconds <= 0.0 {
            return Err(EncodeError::invalid_param(
                "elapsed_seconds",
                format!("must be a positive number of seconds, got {elapsed_seconds}"),
            ));
        }
        let base_beats = positive_count("base_beats", base_beats)?;
        let subdivision = positive_count("subdivision", subdivision)?;

        let spec = Self {
            clicks,
            elapsed_seconds,
            base_beats,
            subdivision,
        };

        let max_samples = (u32::MAX as usize - HEADER_SIZE) / 2;
        let total_samples = (spec.total_duration() * SAMPLE_RATE as f64).round();
        if total_samples > max_samples as f64 {
            return Err(EncodeError::invalid_param(
                "base_beats",
                format!(
                    "track of {:.1} seconds exceeds the WAV size limit",
                    spec.total_duration()
                ),
            ));
        }

        Ok(spec)
    }

    /// Builds a spec from a tempo in beats per minute.
    ///
    /// A BPM value is treated as `bpm` clicks recorded over one minute.
    pub fn from_bpm(bpm: i64, base_beats: i64) -> EncodeResult<Self> {
        Self::new(bpm, BPM_WINDOW_SECONDS, base_beats, 1)
    }

    /// Returns a copy of this spec with a different subdivision factor.
    pub fn with_subdivision(self, subdivision: i64) -> EncodeResult<Self> {
        Self::new(
            self.clicks as i64,
            self.elapsed_seconds,
            self.base_beats as i64,
            subdivision,
        )
    }

    /// Seconds per base beat, averaged over the recorded clicks.
    pub fn base_beat_duration(&self) -> f64 {
        self.elapsed_seconds / self.clicks as f64
    }

    /// Total track length in seconds. Independent of the subdivision.
    pub fn total_duration(&self) -> f64 {
        self.base_beat_duration() * self.base_beats as f64
    }

    /// Number of click events to place.
    pub fn num_beats(&self) -> u64 {
        self.base_beats as u64 * self.subdivision as u64
    }

    /// Seconds between consecutive click events.
    pub fn effective_beat_duration(&self) -> f64 {
        self.base_beat_duration() / self.subdivision as f64
    }

    /// Estimated tempo of the base beat.
    pub fn bpm(&self) -> f64 {
        60.0 / self.base_beat_duration()
    }
}

fn positive_count(name: &'static str, value: i64) -> EncodeResult<u32> {
    if value <= 0 {
        return Err(EncodeError::invalid_param(
            name,
            format!("must be greater than zero, got {value}"),
        ));
    }
    u32::try_from(value)
        .map_err(|_| EncodeError::invalid_param(name, format!("{value} is too large")))
}
