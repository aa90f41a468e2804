//! Canonical WAV container writer.
//!
//! This module writes 16-bit PCM WAV files with the fixed 44-byte header and no
//! extra chunks, so identical sample buffers always serialize to identical
//! bytes. The hash of the PCM payload can be used to compare files by content.

mod format;
mod pcm;
mod writer;


// Re-export public API
pub use format::{WavFormat, HEADER_SIZE};
pub use pcm::{compute_pcm_hash, extract_pcm_data, parse_format, pcm16_to_samples};
pub use writer::{samples_to_pcm16, wav_header, write_wav, write_wav_to_vec};
