//! Click-track file encoder.
//!
//! Ties click synthesis and the WAV writer together: renders a [`BeatSpec`],
//! serializes it and writes `output_<N>.wav` into an output directory, with
//! `N` taken from a caller-owned [`FileCounter`].

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::beat::BeatSpec;
use crate::click::{render, PcmBuffer, SAMPLE_RATE};
use crate::error::{EncodeError, EncodeResult};
use crate::wav::{samples_to_pcm16, write_wav, write_wav_to_vec, WavFormat};

/// Sequential source of output file numbers.
///
/// Starts at 0; every call to [`FileCounter::advance`] returns the next number,
/// so the first file is `output_1.wav`.
#[derive(Debug, Default, Clone)]
pub struct FileCounter {
    count: u64,
}

impl FileCounter {
    /// Creates a counter that has not issued any number yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the counter and returns the new value.
    pub fn advance(&mut self) -> u64 {
        self.count += 1;
        self.count
    }

    /// Last number issued, or 0 if none.
    pub fn current(&self) -> u64 {
        self.count
    }
}

/// Returns the file name used for counter value `index`.
pub fn file_name(index: u64) -> String {
    format!("output_{index}.wav")
}

/// Summary of one encoded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodeReport {
    /// Path of the written file.
    pub path: PathBuf,
    /// Counter value used for the file name.
    pub file_index: u64,
    /// Parameters the file was rendered from.
    pub spec: BeatSpec,
    /// Number of samples in the data chunk.
    pub num_samples: usize,
    /// Track length in seconds.
    pub duration_seconds: f64,
    /// Tempo of the base beat.
    pub bpm: f64,
    /// Click events requested (`base_beats * subdivision`).
    pub clicks_requested: u64,
    /// Click events written.
    pub clicks_placed: u64,
    /// Click events dropped at the end of the track.
    pub clicks_dropped: u64,
    /// BLAKE3 hash of the PCM payload.
    pub pcm_hash: String,
}

/// Serializes a rendered buffer as a complete WAV file.
pub fn to_wav_bytes(buffer: &PcmBuffer) -> Vec<u8> {
    write_wav_to_vec(
        &WavFormat::mono(SAMPLE_RATE),
        &samples_to_pcm16(buffer.samples()),
    )
}

/// Writes click-track files into one output directory.
#[derive(Debug, Clone)]
pub struct Encoder {
    out_dir: PathBuf,
    format: WavFormat,
}

impl Encoder {
    /// Creates an encoder writing into `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            format: WavFormat::mono(SAMPLE_RATE),
        }
    }

    /// Renders `spec` and writes it to the next numbered file.
    ///
    /// The counter advances once per call, before the file is created, so a
    /// failed write still consumes its number.
    pub fn encode(&self, spec: &BeatSpec, counter: &mut FileCounter) -> EncodeResult<EncodeReport> {
        debug!(
            base_beat_duration = spec.base_beat_duration(),
            total_duration = spec.total_duration(),
            effective_beat_duration = spec.effective_beat_duration(),
            "encoding click track"
        );

        let buffer = render(spec);
        let pcm = samples_to_pcm16(buffer.samples());
        let pcm_hash = blake3::hash(&pcm).to_hex().to_string();

        let file_index = counter.advance();
        let path = self.out_dir.join(file_name(file_index));
        self.write_file(&path, &pcm)?;

        info!(path = %path.display(), samples = buffer.len(), "wrote click track");

        Ok(EncodeReport {
            path,
            file_index,
            spec: *spec,
            num_samples: buffer.len(),
            duration_seconds: buffer.duration_seconds(),
            bpm: spec.bpm(),
            clicks_requested: spec.num_beats(),
            clicks_placed: buffer.clicks_placed(),
            clicks_dropped: buffer.clicks_dropped(),
            pcm_hash,
        })
    }

    fn write_file(&self, path: &Path, pcm: &[u8]) -> EncodeResult<()> {
        let file = File::create(path).map_err(|e| EncodeError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        write_wav(&mut writer, &self.format, pcm)
            .and_then(|()| writer.flush())
            .map_err(|e| EncodeError::io(path, e))
    }
}

/// Validates raw beat parameters and encodes them into `out_dir`.
///
/// Invalid parameters are rejected before the counter is touched.
pub fn encode(
    clicks: i64,
    elapsed_seconds: f64,
    base_beats: i64,
    subdivision: i64,
    out_dir: &Path,
    counter: &mut FileCounter,
) -> EncodeResult<EncodeReport> {
    let spec = BeatSpec::new(clicks, elapsed_seconds, base_beats, subdivision)?;
    Encoder::new(out_dir).encode(&spec, counter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wav::{extract_pcm_data, pcm16_to_samples, HEADER_SIZE};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_counter_sequence() {
        let mut counter = FileCounter::new();
        assert_eq!(counter.current(), 0);
        assert_eq!(counter.advance(), 1);
        assert_eq!(counter.advance(), 2);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(1), "output_1.wav");
        assert_eq!(file_name(42), "output_42.wav");
    }

    #[test]
    fn test_encode_reference_track() {
        let dir = tempfile::tempdir().unwrap();
        let mut counter = FileCounter::new();

        let report = encode(4, 2.0, 4, 1, dir.path(), &mut counter).unwrap();

        assert_eq!(report.path, dir.path().join("output_1.wav"));
        assert_eq!(report.file_index, 1);
        assert_eq!(report.num_samples, 88200);
        assert_eq!(report.duration_seconds, 2.0);
        assert_eq!(report.bpm, 120.0);
        assert_eq!(report.clicks_requested, 4);
        assert_eq!(report.clicks_placed, 4);
        assert_eq!(report.clicks_dropped, 0);

        let bytes = std::fs::read(&report.path).unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE + 88200 * 2);

        let samples = pcm16_to_samples(extract_pcm_data(&bytes).unwrap());
        for start in [0, 22050, 44100, 66150] {
            assert_eq!(&samples[start..start + 10], &[30000i16; 10]);
        }
    }

    #[test]
    fn test_file_matches_in_memory_serialization() {
        let dir = tempfile::tempdir().unwrap();
        let spec = BeatSpec::new(9, 4.2, 3, 2).unwrap();

        let report = Encoder::new(dir.path())
            .encode(&spec, &mut FileCounter::new())
            .unwrap();

        let on_disk = std::fs::read(&report.path).unwrap();
        assert_eq!(on_disk, to_wav_bytes(&render(&spec)));
    }

    #[test]
    fn test_consecutive_calls_get_new_names() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = Encoder::new(dir.path());
        let spec = BeatSpec::new(4, 2.0, 4, 1).unwrap();
        let mut counter = FileCounter::new();

        let first = encoder.encode(&spec, &mut counter).unwrap();
        let second = encoder.encode(&spec.with_subdivision(2).unwrap(), &mut counter).unwrap();

        assert_eq!(first.path.file_name().unwrap(), "output_1.wav");
        assert_eq!(second.path.file_name().unwrap(), "output_2.wav");
        assert_eq!(first.num_samples, second.num_samples);
        assert_ne!(first.pcm_hash, second.pcm_hash);
    }

    #[test]
    fn test_invalid_parameters_leave_counter_and_disk_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut counter = FileCounter::new();

        let err = encode(0, 2.0, 4, 1, dir.path(), &mut counter).unwrap_err();

        assert!(err.is_invalid_parameters());
        assert_eq!(counter.current(), 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_directory_is_io_error_and_consumes_number() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let mut counter = FileCounter::new();

        let err = encode(4, 2.0, 4, 1, &missing, &mut counter).unwrap_err();

        assert!(matches!(err, EncodeError::Io { .. }));
        assert_eq!(counter.current(), 1);

        // The encoder stays usable after a failure.
        let report = encode(4, 2.0, 4, 1, dir.path(), &mut counter).unwrap();
        assert_eq!(report.file_index, 2);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let dir = tempfile::tempdir().unwrap();
        let report = encode(4, 2.0, 4, 1, dir.path(), &mut FileCounter::new()).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["num_samples"], 88200);
        assert_eq!(json["spec"]["clicks"], 4);
        assert_eq!(json["clicks_placed"], 4);
    }
}
