//! WAV parsing, PCM data extraction and hashing utilities.

use super::format::WavFormat;

/// Reads a little-endian u32 from four bytes at `pos`.
fn read_u32(data: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
}

/// Reads a little-endian u16 from two bytes at `pos`.
fn read_u16(data: &[u8], pos: usize) -> u16 {
    u16::from_le_bytes([data[pos], data[pos + 1]])
}

/// Walks the RIFF chunk list and returns `(id, body)` for each complete chunk.
fn chunks<'a>(wav_data: &'a [u8]) -> impl Iterator<Item = (&'a [u8], &'a [u8])> + 'a {
    let mut pos = 12;
    std::iter::from_fn(move || {
        if pos + 8 > wav_data.len() {
            return None;
        }
        let chunk_id = &wav_data[pos..pos + 4];
        let chunk_size = read_u32(wav_data, pos + 4) as usize;
        let body_start = pos + 8;
        let body_end = body_start.checked_add(chunk_size)?;
        if body_end > wav_data.len() {
            return None;
        }
        // Chunks are word-aligned
        pos = body_end + (chunk_size % 2);
        Some((chunk_id, &wav_data[body_start..body_end]))
    })
}

fn is_riff_wave(wav_data: &[u8]) -> bool {
    wav_data.len() >= super::HEADER_SIZE
        && &wav_data[0..4] == b"RIFF"
        && &wav_data[8..12] == b"WAVE"
}

/// Parses the `fmt ` chunk of a PCM WAV file.
///
/// # Returns
/// The format if the file is a RIFF/WAVE container with an uncompressed PCM
/// `fmt ` chunk, or None otherwise
pub fn parse_format(wav_data: &[u8]) -> Option<WavFormat> {
    if !is_riff_wave(wav_data) {
        return None;
    }
    let (_, fmt) = chunks(wav_data).find(|(id, _)| *id == b"fmt ")?;
    if fmt.len() < 16 || read_u16(fmt, 0) != 1 {
        return None;
    }
    Some(WavFormat {
        channels: read_u16(fmt, 2),
        sample_rate: read_u32(fmt, 4),
        bits_per_sample: read_u16(fmt, 14),
    })
}

/// Extracts PCM data from a WAV file buffer.
///
/// Used for comparing WAV files by their audio content only.
///
/// # Returns
/// PCM data if found, or None if the format is invalid
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if !is_riff_wave(wav_data) {
        return None;
    }
    chunks(wav_data)
        .find(|(id, _)| *id == b"data")
        .map(|(_, body)| body)
}

/// Decodes little-endian 16-bit PCM bytes into samples.
///
/// A trailing odd byte is ignored.
pub fn pcm16_to_samples(pcm: &[u8]) -> Vec<i16> {
    pcm.chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Computes the BLAKE3 hash of the PCM payload of a WAV file.
///
/// # Returns
/// Hex digest, or None if the format is invalid
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}
