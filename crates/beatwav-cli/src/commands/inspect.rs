//! `inspect` command: header fields and click positions of a WAV file.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use beatwav_core::find_click_onsets;
use beatwav_core::wav::{extract_pcm_data, parse_format, pcm16_to_samples};
use colored::Colorize;

use super::json_output::{error_codes, InspectOutput, JsonError, WavSummary};

/// Onsets listed in human output before eliding the rest.
const MAX_LISTED_ONSETS: usize = 16;

/// Run the inspect command
///
/// # Returns
/// Exit code: 0 if the file is a readable PCM WAV file, 1 otherwise
pub fn run(path: &Path, json_output: bool) -> Result<ExitCode> {
    let output = match summarize(path) {
        Ok(info) => InspectOutput {
            ok: true,
            info: Some(info),
            errors: Vec::new(),
        },
        Err(error) => InspectOutput {
            ok: false,
            info: None,
            errors: vec![error],
        },
    };

    if json_output {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print_human(&output);
    }

    Ok(if output.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Reads `path` and summarizes its header and clicks.
pub fn summarize(path: &Path) -> Result<WavSummary, JsonError> {
    let data = fs::read(path).map_err(|e| {
        JsonError::new(
            error_codes::FILE_READ,
            format!("cannot read {}: {}", path.display(), e),
        )
    })?;

    let not_wav = || {
        JsonError::new(
            error_codes::NOT_WAV,
            format!("{} is not a PCM WAV file", path.display()),
        )
    };
    let format = parse_format(&data).ok_or_else(not_wav)?;
    let pcm = extract_pcm_data(&data).ok_or_else(not_wav)?;
    if format.channels != 1 || format.bits_per_sample != 16 || format.sample_rate == 0 {
        return Err(JsonError::new(
            error_codes::NOT_WAV,
            format!(
                "{}: only mono 16-bit files can be inspected ({} channel(s), {} bits)",
                path.display(),
                format.channels,
                format.bits_per_sample
            ),
        ));
    }

    let samples = pcm16_to_samples(pcm);
    let click_onsets = find_click_onsets(&samples);
    let sample_rate = format.sample_rate as f64;

    Ok(WavSummary {
        path: path.display().to_string(),
        channels: format.channels,
        sample_rate: format.sample_rate,
        bits_per_sample: format.bits_per_sample,
        num_samples: samples.len(),
        duration_seconds: samples.len() as f64 / sample_rate,
        click_bpm: click_bpm(&click_onsets, sample_rate),
        click_onsets,
    })
}

/// Tempo implied by the mean distance between consecutive onsets.
fn click_bpm(onsets: &[usize], sample_rate: f64) -> Option<f64> {
    let (first, last) = (onsets.first()?, onsets.last()?);
    let intervals = onsets.len().checked_sub(1).filter(|&n| n > 0)?;
    let mean_interval = (last - first) as f64 / intervals as f64 / sample_rate;
    Some(60.0 / mean_interval)
}

fn print_human(output: &InspectOutput) {
    for error in &output.errors {
        eprintln!("{} {}", "error:".red().bold(), error.message);
    }
    let Some(info) = &output.info else {
        return;
    };

    println!("{}", info.path.cyan().bold());
    println!(
        "  {} PCM, {} channel(s), {} Hz, {} bit",
        "->".green(),
        info.channels,
        info.sample_rate,
        info.bits_per_sample
    );
    println!(
        "  {} {} samples ({:.3} s)",
        "->".green(),
        info.num_samples,
        info.duration_seconds
    );

    let listed: Vec<String> = info
        .click_onsets
        .iter()
        .take(MAX_LISTED_ONSETS)
        .map(|o| o.to_string())
        .collect();
    let more = info.click_onsets.len().saturating_sub(MAX_LISTED_ONSETS);
    let suffix = if more > 0 {
        format!(" (+{} more)", more)
    } else {
        String::new()
    };
    println!(
        "  {} {} click(s): {}{}",
        "->".green(),
        info.click_onsets.len(),
        listed.join(", "),
        suffix.dimmed()
    );

    if let Some(bpm) = info.click_bpm {
        println!("  {} click spacing {:.2} BPM", "->".green(), bpm);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beatwav_core::{encode, FileCounter};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_summarize_encoded_track() {
        let dir = tempfile::tempdir().unwrap();
        let report = encode(4, 2.0, 4, 1, dir.path(), &mut FileCounter::new()).unwrap();

        let info = summarize(&report.path).unwrap();

        assert_eq!(info.channels, 1);
        assert_eq!(info.sample_rate, 44100);
        assert_eq!(info.bits_per_sample, 16);
        assert_eq!(info.num_samples, 88200);
        assert_eq!(info.duration_seconds, 2.0);
        assert_eq!(info.click_onsets, vec![0, 22050, 44100, 66150]);
        assert_eq!(info.click_bpm, Some(120.0));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = summarize(&dir.path().join("nope.wav")).unwrap_err();
        assert_eq!(err.code, error_codes::FILE_READ);
    }

    #[test]
    fn test_not_a_wav_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"definitely not a RIFF file, just some text padding").unwrap();

        let err = summarize(&path).unwrap_err();
        assert_eq!(err.code, error_codes::NOT_WAV);
        assert_eq!(run(&path, true).unwrap(), ExitCode::from(1));
    }

    #[test]
    fn test_click_bpm_needs_two_onsets() {
        assert_eq!(click_bpm(&[], 44100.0), None);
        assert_eq!(click_bpm(&[100], 44100.0), None);
        assert_eq!(click_bpm(&[0, 44100], 44100.0), Some(60.0));
    }
}
