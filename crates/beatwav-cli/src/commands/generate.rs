//! Non-interactive `bpm` and `tap` commands.
//!
//! Writes the base click track and one extra file per requested subdivision,
//! exactly as the interactive session would for the same answers.

use std::iter;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use beatwav_core::{EncodeReport, Encoder, FileCounter};
use colored::Colorize;

use super::json_output::{GenerateOutput, JsonError};
use crate::tap::{Measurement, TapSource};

/// Run the `bpm` command.
///
/// # Arguments
/// * `bpm` - Tempo in beats per minute
/// * `beats` - Number of base beats in every file
/// * `subdivisions` - Extra files to write, one per sub-beat factor
/// * `out_dir` - Output directory
/// * `json_output` - Print a JSON report instead of colored text
///
/// # Returns
/// Exit code: 0 if every file was written, 1 otherwise
pub fn run_bpm(
    bpm: i64,
    beats: i64,
    subdivisions: &[i64],
    out_dir: &Path,
    json_output: bool,
) -> Result<ExitCode> {
    run(&Measurement::from_bpm(bpm), beats, subdivisions, out_dir, json_output)
}

/// Run the `tap` command from an existing measurement.
pub fn run_tap(
    clicks: i64,
    seconds: f64,
    beats: i64,
    subdivisions: &[i64],
    out_dir: &Path,
    json_output: bool,
) -> Result<ExitCode> {
    let measurement = Measurement {
        clicks,
        elapsed_seconds: seconds,
        source: TapSource::Recorded,
    };
    run(&measurement, beats, subdivisions, out_dir, json_output)
}

fn run(
    measurement: &Measurement,
    beats: i64,
    subdivisions: &[i64],
    out_dir: &Path,
    json_output: bool,
) -> Result<ExitCode> {
    let output = encode_all(measurement, beats, subdivisions, out_dir);

    if json_output {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print_human(measurement, &output);
    }

    Ok(if output.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Encodes the base file and every subdivision, continuing past failures.
pub fn encode_all(
    measurement: &Measurement,
    beats: i64,
    subdivisions: &[i64],
    out_dir: &Path,
) -> GenerateOutput {
    let encoder = Encoder::new(out_dir);
    let mut counter = FileCounter::new();
    let mut files = Vec::new();
    let mut errors = Vec::new();

    for subdivision in iter::once(1).chain(subdivisions.iter().copied()) {
        let result = measurement
            .beat_spec(beats, subdivision)
            .and_then(|spec| encoder.encode(&spec, &mut counter));
        match result {
            Ok(report) => files.push(report),
            Err(e) => {
                tracing::warn!(error = %e, subdivision, "encoding failed");
                errors.push(JsonError::from_encode(&e, subdivision));
            }
        }
    }

    GenerateOutput {
        ok: errors.is_empty(),
        files,
        errors,
    }
}

fn print_human(measurement: &Measurement, output: &GenerateOutput) {
    if let Some(bpm) = measurement.bpm() {
        println!(
            "{} {} clicks in {:.3} s ({:.2} BPM)",
            "Tempo:".cyan().bold(),
            measurement.clicks,
            measurement.elapsed_seconds,
            bpm
        );
    }

    for report in &output.files {
        print_report(report);
    }
    for error in &output.errors {
        eprintln!("{} {}", "error:".red().bold(), error.message);
    }

    println!();
    if output.ok {
        println!(
            "{} {} file(s) written",
            "SUCCESS".green().bold(),
            output.files.len()
        );
    } else {
        println!(
            "{} {} file(s) written, {} failed",
            "WARNING".yellow().bold(),
            output.files.len(),
            output.errors.len()
        );
    }
}

fn print_report(report: &EncodeReport) {
    println!(
        "{} WAV file generated successfully: {}",
        "ok".green(),
        report.path.display()
    );
    let detail = format!(
        "{} beat(s) x {} sub-beat(s), {} samples, {:.3} s",
        report.spec.base_beats, report.spec.subdivision, report.num_samples, report.duration_seconds
    );
    println!("   {}", detail.dimmed());
    if report.clicks_dropped > 0 {
        println!(
            "   {} {} click(s) did not fit at the end of the track",
            "!!".yellow(),
            report.clicks_dropped
        );
    }
}
