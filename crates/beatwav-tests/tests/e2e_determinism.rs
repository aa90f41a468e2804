//! Determinism tests for click-track encoding.
//!
//! Identical parameters must produce byte-identical files; only the file
//! name taken from the counter differs between runs.

use std::fs;

use beatwav_core::wav::compute_pcm_hash;
use beatwav_core::{render, to_wav_bytes, BeatSpec, Encoder, FileCounter};
use beatwav_tests::determinism::{compute_hash, verify_determinism};
use beatwav_tests::REFERENCE_CASES;
use pretty_assertions::assert_eq;

// ============================================================================
// In-Memory Rendering
// ============================================================================

#[test]
fn reference_cases_render_deterministically() {
    for case in REFERENCE_CASES {
        let spec = BeatSpec::new(
            case.clicks,
            case.elapsed_seconds,
            case.base_beats,
            case.subdivision,
        )
        .unwrap();
        let result = verify_determinism(|| to_wav_bytes(&render(&spec)), 3);
        assert!(result.is_deterministic, "{}", case.name);
        result.assert_deterministic();
    }
}

// ============================================================================
// Written Files
// ============================================================================

#[test]
fn repeated_encodes_write_identical_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let encoder = Encoder::new(dir.path());
    let mut counter = FileCounter::new();
    let spec = BeatSpec::new(13, 6.37, 16, 4).unwrap();

    let first = encoder.encode(&spec, &mut counter).unwrap();
    let second = encoder.encode(&spec, &mut counter).unwrap();

    assert_ne!(first.path, second.path);
    let a = fs::read(&first.path).unwrap();
    let b = fs::read(&second.path).unwrap();
    assert_eq!(compute_hash(&a), compute_hash(&b));
    assert_eq!(first.pcm_hash, second.pcm_hash);
    assert_eq!(compute_pcm_hash(&a).as_deref(), Some(first.pcm_hash.as_str()));
}

#[test]
fn file_matches_in_memory_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let spec = BeatSpec::new(5, 2.5, 8, 2).unwrap();

    let report = Encoder::new(dir.path())
        .encode(&spec, &mut FileCounter::new())
        .unwrap();

    let on_disk = fs::read(&report.path).unwrap();
    let in_memory = to_wav_bytes(&render(&spec));
    assert_eq!(compute_hash(&on_disk), compute_hash(&in_memory));
}

#[test]
fn subdivision_one_matches_base_track() {
    let base = BeatSpec::new(4, 2.0, 4, 1).unwrap();
    let explicit = BeatSpec::from_bpm(120, 4).unwrap();

    assert_eq!(
        compute_hash(&to_wav_bytes(&render(&base))),
        compute_hash(&to_wav_bytes(&render(&explicit)))
    );
}

#[test]
fn different_subdivisions_share_header() {
    let base = BeatSpec::new(3, 1.5, 6, 1).unwrap();
    let halves = base.with_subdivision(2).unwrap();

    let a = to_wav_bytes(&render(&base));
    let b = to_wav_bytes(&render(&halves));

    assert_eq!(&a[..44], &b[..44]);
    assert_ne!(compute_hash(&a), compute_hash(&b));
}
