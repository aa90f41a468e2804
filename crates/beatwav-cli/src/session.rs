//! Interactive click-track session.
//!
//! After a tempo has been measured the session asks for the track length,
//! writes the base file and then offers to write extra files with sub-beats,
//! all from the same measurement. Encoding failures are reported and the
//! session carries on.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use beatwav_core::{EncodeReport, Encoder, FileCounter};
use tracing::warn;

use crate::console::Console;
use crate::keys::KeySource;
use crate::tap::Measurement;

/// Runtime settings for an interactive session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Directory the WAV files are written to.
    pub out_dir: PathBuf,
    /// Clear the screen between steps and flash on every tap.
    pub clear_screen: bool,
    /// Invalid answers tolerated per question.
    pub max_attempts: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            clear_screen: true,
            max_attempts: 5,
        }
    }
}

/// Writes the base file and any subdivided files for one measurement.
pub struct Session {
    encoder: Encoder,
    counter: FileCounter,
    max_attempts: u32,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            encoder: Encoder::new(&config.out_dir),
            counter: FileCounter::new(),
            max_attempts: config.max_attempts,
        }
    }

    /// Counter used for file names; shared by every file of the session.
    pub fn counter(&self) -> &FileCounter {
        &self.counter
    }

    /// Runs the question loop and returns the files that were written.
    pub fn run<R, W, K>(
        &mut self,
        measurement: &Measurement,
        console: &mut Console<R, W>,
        keys: &mut K,
    ) -> Result<Vec<EncodeReport>>
    where
        R: BufRead,
        W: Write,
        K: KeySource,
    {
        let mut written = Vec::new();

        let base_beats = console.read_positive(
            "How many beats do you want the WAV to include (e.g. 4 will result in a WAV that is 4 beats long)?",
            self.max_attempts,
        )?;

        console.status("Creating base .wav file...")?;
        written.extend(self.write_track(measurement, base_beats, 1, console)?);

        loop {
            console.prompt("Do you want to create an additional .wav file with sub-beats? (y/n)")?;
            let key = keys.read_key()?;
            console.info(&key.echo())?;
            if !key.is_yes() {
                break;
            }

            let subdivision =
                console.read_positive("How many sub-beats per beat do you want?", self.max_attempts)?;
            written.extend(self.write_track(measurement, base_beats, subdivision, console)?);
        }

        Ok(written)
    }

    /// Encodes one file, reporting the outcome on the console.
    ///
    /// Returns `Ok(None)` when encoding failed; the failure has been shown.
    fn write_track<R, W>(
        &mut self,
        measurement: &Measurement,
        base_beats: i64,
        subdivision: i64,
        console: &mut Console<R, W>,
    ) -> Result<Option<EncodeReport>>
    where
        R: BufRead,
        W: Write,
    {
        let result = measurement
            .beat_spec(base_beats, subdivision)
            .and_then(|spec| self.encoder.encode(&spec, &mut self.counter));

        match result {
            Ok(report) => {
                console.success(&format!(
                    "WAV file generated successfully: {}",
                    report.path.display()
                ))?;
                if report.clicks_dropped > 0 {
                    console.status(&format!(
                        "{} click(s) did not fit at the end of the track and were left out.",
                        report.clicks_dropped
                    ))?;
                }
                Ok(Some(report))
            }
            Err(e) => {
                warn!(error = %e, code = e.code(), "encoding failed");
                console.error(&format!("Could not create the WAV file: {e}"))?;
                Ok(None)
            }
        }
    }
}
