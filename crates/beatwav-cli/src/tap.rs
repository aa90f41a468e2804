//! Tap-tempo recording.
//!
//! The first key picks the mode: Space starts timing, `m` switches to typing a
//! BPM value, anything else re-shows the instructions. While timing, every
//! Space counts a click and any other key counts the final click and stops.

use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use beatwav_core::beat::BPM_WINDOW_SECONDS;
use beatwav_core::{BeatSpec, EncodeResult};
use serde::Serialize;
use tracing::debug;

use crate::clock::Clock;
use crate::console::Console;
use crate::keys::{Key, KeySource};

const INSTRUCTIONS: &str = "Press [SPACE] to start recording. Press any other key to stop recording (has to be on-beat).\nPress [m] to manually enter BPM.";

/// How a measurement was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TapSource {
    /// Timed keypresses.
    Recorded,
    /// BPM typed in by the user.
    Manual,
}

/// Clicks counted over a span of time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    pub clicks: i64,
    pub elapsed_seconds: f64,
    pub source: TapSource,
}

impl Measurement {
    /// A typed BPM, expressed as `bpm` clicks over one minute.
    pub fn from_bpm(bpm: i64) -> Self {
        Self {
            clicks: bpm,
            elapsed_seconds: BPM_WINDOW_SECONDS,
            source: TapSource::Manual,
        }
    }

    /// Estimated tempo, if any time has elapsed.
    pub fn bpm(&self) -> Option<f64> {
        (self.elapsed_seconds > 0.0).then(|| self.clicks as f64 * 60.0 / self.elapsed_seconds)
    }

    /// Beat parameters for a track of `base_beats` beats split `subdivision` ways.
    pub fn beat_spec(&self, base_beats: i64, subdivision: i64) -> EncodeResult<BeatSpec> {
        BeatSpec::new(self.clicks, self.elapsed_seconds, base_beats, subdivision)
    }
}

/// Records a tempo from keypresses.
#[derive(Debug, Clone)]
pub struct TapRecorder {
    max_attempts: u32,
}

impl TapRecorder {
    /// Creates a recorder that re-shows the instructions at most
    /// `max_attempts` times before giving up.
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Runs one recording.
    pub fn record<R, W, K, C>(
        &self,
        console: &mut Console<R, W>,
        keys: &mut K,
        clock: &C,
    ) -> Result<Measurement>
    where
        R: BufRead,
        W: Write,
        K: KeySource,
        C: Clock,
    {
        for attempt in 1..=self.max_attempts {
            console.status(INSTRUCTIONS)?;
            match keys.read_key()? {
                Key::Space => {
                    console.flash_click()?;
                    return self.time_clicks(console, keys, clock);
                }
                Key::Char('m') | Key::Char('M') => {
                    console.clear()?;
                    let bpm = console.read_positive("Please enter your desired BPM:", self.max_attempts)?;
                    return Ok(Measurement::from_bpm(bpm));
                }
                Key::Interrupt => bail!("recording cancelled"),
                other => {
                    debug!(?other, attempt, "unrecognized start key");
                    console.clear()?;
                }
            }
        }
        bail!(
            "recording not started after {} attempts",
            self.max_attempts
        )
    }

    fn time_clicks<R, W, K, C>(
        &self,
        console: &mut Console<R, W>,
        keys: &mut K,
        clock: &C,
    ) -> Result<Measurement>
    where
        R: BufRead,
        W: Write,
        K: KeySource,
        C: Clock,
    {
        let start = clock.now();
        let mut clicks = 0i64;
        loop {
            let key = keys.read_key()?;
            if key == Key::Interrupt {
                bail!("recording cancelled");
            }
            clicks += 1;
            if key != Key::Space {
                console.clear()?;
                break;
            }
            console.flash_click()?;
        }
        let elapsed = clock.now().saturating_sub(start);

        debug!(clicks, elapsed_ms = elapsed.as_millis() as u64, "recording finished");

        Ok(Measurement {
            clicks,
            elapsed_seconds: elapsed.as_secs_f64(),
            source: TapSource::Recorded,
        })
    }
}
