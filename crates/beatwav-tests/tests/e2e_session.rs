//! Scripted end-to-end runs of the interactive session and the
//! non-interactive commands.

use std::io::Cursor;
use std::process::ExitCode;
use std::time::Duration;

use beatwav_cli::clock::ManualClock;
use beatwav_cli::commands::{generate, inspect, record};
use beatwav_cli::console::Console;
use beatwav_cli::keys::{Key, ScriptedKeys};
use beatwav_cli::session::SessionConfig;
use beatwav_cli::tap::{Measurement, TapSource};
use beatwav_tests::format_validators::validate_canonical_wav;
use pretty_assertions::assert_eq;

fn config(dir: &tempfile::TempDir) -> SessionConfig {
    SessionConfig {
        out_dir: dir.path().to_path_buf(),
        clear_screen: false,
        max_attempts: 3,
    }
}

fn taps(count: usize, interval: Duration, stop: Key) -> Vec<(Duration, Key)> {
    let mut keys = vec![(Duration::ZERO, Key::Space)];
    keys.extend((1..count).map(|_| (interval, Key::Space)));
    keys.push((interval, stop));
    keys
}

// ============================================================================
// Interactive Session
// ============================================================================

#[test]
fn recorded_session_writes_base_and_subdivided_files() {
    colored::control::set_override(false);
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::new();
    let mut script = taps(4, Duration::from_millis(500), Key::Enter);
    script.push((Duration::ZERO, Key::Char('y')));
    script.push((Duration::ZERO, Key::Char('Y')));
    script.push((Duration::ZERO, Key::Char('n')));
    let mut keys = ScriptedKeys::timed(script, clock.clone());
    let mut console = Console::new(Cursor::new(b"4\n2\n4\n".to_vec()), Vec::new());

    let code = record::run_with(&config(&dir), &mut console, &mut keys, &clock).unwrap();

    assert_eq!(code, ExitCode::SUCCESS);
    assert_eq!(keys.remaining(), 0);
    let expected_clicks = [4usize, 8, 16];
    for (index, clicks) in expected_clicks.iter().enumerate() {
        let path = dir.path().join(format!("output_{}.wav", index + 1));
        let bytes = std::fs::read(&path).unwrap();
        let info = validate_canonical_wav(&bytes).unwrap();
        assert_eq!(info.num_samples, 88200, "{}", path.display());

        let samples = beatwav_core::wav::pcm16_to_samples(&bytes[44..]);
        assert_eq!(
            beatwav_core::find_click_onsets(&samples).len(),
            *clicks,
            "{}",
            path.display()
        );
    }

    let text = String::from_utf8(console.into_output()).unwrap();
    assert!(text.contains("Recorded 4 clicks in 2.000 seconds."));
    assert!(text.contains("WAV file generated successfully"));
}

#[test]
fn invalid_beat_count_is_asked_again() {
    colored::control::set_override(false);
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::new();
    let mut keys = ScriptedKeys::new([Key::Char('m'), Key::Char('n')]);
    let mut console = Console::new(Cursor::new(b"120\nabc\n-2\n8\n".to_vec()), Vec::new());

    let code = record::run_with(&config(&dir), &mut console, &mut keys, &clock).unwrap();

    assert_eq!(code, ExitCode::SUCCESS);
    let bytes = std::fs::read(dir.path().join("output_1.wav")).unwrap();
    // 8 beats at 120 BPM: four seconds.
    assert_eq!(validate_canonical_wav(&bytes).unwrap().num_samples, 4 * 44100);
}

#[test]
fn interrupt_before_start_cancels_without_files() {
    colored::control::set_override(false);
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::new();
    let mut keys = ScriptedKeys::new([Key::Interrupt]);
    let mut console = Console::new(Cursor::new(Vec::new()), Vec::new());

    let result = record::run_with(&config(&dir), &mut console, &mut keys, &clock);

    assert!(result.is_err());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

// ============================================================================
// Non-Interactive Commands
// ============================================================================

#[test]
fn encode_all_writes_every_subdivision() {
    let dir = tempfile::tempdir().unwrap();
    let measurement = Measurement {
        clicks: 4,
        elapsed_seconds: 2.0,
        source: TapSource::Recorded,
    };

    let output = generate::encode_all(&measurement, 4, &[2, 3], dir.path());

    assert!(output.ok);
    let names: Vec<String> = output
        .files
        .iter()
        .map(|r| r.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["output_1.wav", "output_2.wav", "output_3.wav"]);
    let subdivisions: Vec<u32> = output.files.iter().map(|r| r.spec.subdivision).collect();
    assert_eq!(subdivisions, vec![1, 2, 3]);
}

#[test]
fn encode_all_continues_after_invalid_subdivision() {
    let dir = tempfile::tempdir().unwrap();

    let output = generate::encode_all(&Measurement::from_bpm(90), 3, &[0, 2], dir.path());

    assert!(!output.ok);
    assert_eq!(output.files.len(), 2);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].code, "ENC_001");
    assert_eq!(output.errors[0].subdivision, Some(0));
    // Rejected parameters do not consume a file number.
    assert_eq!(output.files[1].file_index, 2);

    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["files"][0]["file_index"], 1);
    assert_eq!(json["errors"][0]["code"], "ENC_001");
}

#[test]
fn inspect_reads_back_generated_tempo() {
    let dir = tempfile::tempdir().unwrap();
    let output = generate::encode_all(&Measurement::from_bpm(120), 8, &[], dir.path());
    assert!(output.ok);

    let summary = inspect::summarize(&output.files[0].path).unwrap();

    assert_eq!(summary.channels, 1);
    assert_eq!(summary.sample_rate, 44100);
    assert_eq!(summary.num_samples, 4 * 44100);
    assert_eq!(summary.click_onsets.len(), 8);
    let bpm = summary.click_bpm.unwrap();
    assert!((bpm - 120.0).abs() < 1e-6, "bpm = {bpm}");
}

#[test]
fn inspect_rejects_non_wav_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "not audio").unwrap();

    let err = inspect::summarize(&path).unwrap_err();

    assert_eq!(err.code, "CLI_002");
}
