//! WAV file format validator.

use super::FormatError;

const CANONICAL_HEADER_SIZE: usize = 44;

/// Information extracted from a WAV file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavInfo {
    /// Value of the RIFF ChunkSize field.
    pub riff_size: u32,
    /// Audio format code (1 = PCM).
    pub audio_format: u16,
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Byte rate (sample_rate * channels * bits_per_sample / 8).
    pub byte_rate: u32,
    /// Block alignment (channels * bits_per_sample / 8).
    pub block_align: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Offset of the first sample byte.
    pub data_offset: usize,
    /// Size of the data chunk in bytes.
    pub data_size: usize,
    /// Number of sample frames.
    pub num_samples: usize,
}

fn u16_at(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn u32_at(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Validate WAV file format and extract header information.
///
/// Parses the RIFF/WAVE chunk list and validates:
/// - RIFF chunk identifier and WAVE format identifier
/// - fmt sub-chunk with audio parameters
/// - data sub-chunk presence and bounds
///
/// # Returns
/// * `Ok(WavInfo)` - Successfully parsed WAV file information
/// * `Err(FormatError)` - Invalid or corrupted WAV file
pub fn validate_wav(data: &[u8]) -> Result<WavInfo, FormatError> {
    if data.len() < CANONICAL_HEADER_SIZE {
        return Err(FormatError::new(
            "WAV",
            format!(
                "File too short: {} bytes (minimum {} required)",
                data.len(),
                CANONICAL_HEADER_SIZE
            ),
        ));
    }
    if &data[0..4] != b"RIFF" {
        return Err(FormatError::at_offset(
            "WAV",
            format!("Invalid RIFF header: expected 'RIFF', got {:?}", &data[0..4]),
            0,
        ));
    }
    if &data[8..12] != b"WAVE" {
        return Err(FormatError::at_offset(
            "WAV",
            format!("Invalid WAVE format: expected 'WAVE', got {:?}", &data[8..12]),
            8,
        ));
    }

    let mut fmt: Option<(u16, u16, u32, u32, u16, u16)> = None;
    let mut offset = 12;

    while offset + 8 <= data.len() {
        let chunk_id = &data[offset..offset + 4];
        let chunk_size = u32_at(data, offset + 4) as usize;
        let body = offset + 8;

        if chunk_id == b"fmt " {
            if chunk_size < 16 || body + 16 > data.len() {
                return Err(FormatError::at_offset("WAV", "Truncated fmt chunk", offset));
            }
            fmt = Some((
                u16_at(data, body),
                u16_at(data, body + 2),
                u32_at(data, body + 4),
                u32_at(data, body + 8),
                u16_at(data, body + 12),
                u16_at(data, body + 14),
            ));
        }

        if chunk_id == b"data" {
            let Some((audio_format, channels, sample_rate, byte_rate, block_align, bits)) = fmt
            else {
                return Err(FormatError::at_offset(
                    "WAV",
                    "data chunk found before fmt chunk",
                    offset,
                ));
            };
            if body + chunk_size > data.len() {
                return Err(FormatError::at_offset(
                    "WAV",
                    format!(
                        "data chunk claims {} bytes but only {} remain",
                        chunk_size,
                        data.len() - body
                    ),
                    offset,
                ));
            }
            let num_samples = if block_align > 0 {
                chunk_size / block_align as usize
            } else {
                0
            };
            return Ok(WavInfo {
                riff_size: u32_at(data, 4),
                audio_format,
                channels,
                sample_rate,
                byte_rate,
                block_align,
                bits_per_sample: bits,
                data_offset: body,
                data_size: chunk_size,
                num_samples,
            });
        }

        // Move to next chunk (chunks are word-aligned)
        offset = body + ((chunk_size + 1) & !1);
    }

    if fmt.is_none() {
        return Err(FormatError::new("WAV", "Missing fmt chunk"));
    }
    Err(FormatError::new("WAV", "Missing data chunk"))
}

/// Validate that a file uses the canonical 44-byte mono 16-bit PCM layout.
///
/// On top of [`validate_wav`], checks that the data chunk starts at byte 44,
/// that the file ends where the data chunk ends, that the size fields agree,
/// and that the derived rate fields are consistent.
pub fn validate_canonical_wav(data: &[u8]) -> Result<WavInfo, FormatError> {
    let info = validate_wav(data)?;

    if u32_at(data, 16) != 16 {
        return Err(FormatError::at_offset("WAV", "fmt chunk is not 16 bytes", 16));
    }
    if info.data_offset != CANONICAL_HEADER_SIZE {
        return Err(FormatError::at_offset(
            "WAV",
            format!("data starts at {} instead of 44", info.data_offset),
            36,
        ));
    }
    if data.len() != CANONICAL_HEADER_SIZE + info.data_size {
        return Err(FormatError::new(
            "WAV",
            format!(
                "file is {} bytes, expected {}",
                data.len(),
                CANONICAL_HEADER_SIZE + info.data_size
            ),
        ));
    }
    if info.riff_size as usize != 36 + info.data_size {
        return Err(FormatError::at_offset(
            "WAV",
            format!("ChunkSize {} != 36 + {}", info.riff_size, info.data_size),
            4,
        ));
    }
    if info.audio_format != 1 || info.channels != 1 || info.bits_per_sample != 16 {
        return Err(FormatError::at_offset(
            "WAV",
            format!(
                "expected mono 16-bit PCM, got format {} with {} channel(s) at {} bits",
                info.audio_format, info.channels, info.bits_per_sample
            ),
            20,
        ));
    }
    let expected_align = info.channels * info.bits_per_sample / 8;
    if info.block_align != expected_align
        || info.byte_rate != info.sample_rate * expected_align as u32
    {
        return Err(FormatError::at_offset(
            "WAV",
            "byte rate or block align inconsistent with format",
            28,
        ));
    }

    Ok(info)
}
