//! Core WAV writing and PCM conversion functions.

use std::io::{self, Write};

use super::format::{WavFormat, HEADER_SIZE};

/// Builds the canonical 44-byte header for `data_len` bytes of PCM data.
///
/// Fails with `InvalidInput` when the data does not fit the 32-bit RIFF size
/// fields.
pub fn wav_header(format: &WavFormat, data_len: usize) -> io::Result<[u8; HEADER_SIZE]> {
    let data_size = u32::try_from(data_len)
        .ok()
        .filter(|&size| size <= u32::MAX - 36)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{data_len} bytes of PCM data exceed the WAV size limit"),
            )
        })?;

    let fields: [&[u8]; 13] = [
        b"RIFF",
        &(36 + data_size).to_le_bytes(),
        b"WAVE",
        b"fmt ",
        &16u32.to_le_bytes(), // fmt chunk size for PCM
        &1u16.to_le_bytes(),  // PCM
        &format.channels.to_le_bytes(),
        &format.sample_rate.to_le_bytes(),
        &format.byte_rate().to_le_bytes(),
        &format.block_align().to_le_bytes(),
        &format.bits_per_sample.to_le_bytes(),
        b"data",
        &data_size.to_le_bytes(),
    ];

    let mut header = [0u8; HEADER_SIZE];
    let mut pos = 0;
    for field in fields {
        header[pos..pos + field.len()].copy_from_slice(field);
        pos += field.len();
    }
    debug_assert_eq!(pos, HEADER_SIZE);
    Ok(header)
}

/// Writes the header followed by `pcm_data`.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    writer.write_all(&wav_header(format, pcm_data.len())?)?;
    writer.write_all(pcm_data)
}

/// Writes a WAV file to a byte vector.
///
/// # Panics
/// If `pcm_data` exceeds the WAV size limit; [`crate::BeatSpec`] rejects
/// tracks that long.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(HEADER_SIZE + pcm_data.len());
    write_wav(&mut buffer, format, pcm_data).expect("PCM data within the WAV size limit");
    buffer
}

/// Converts signed 16-bit samples to little-endian PCM bytes.
pub fn samples_to_pcm16(samples: &[i16]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        pcm.extend_from_slice(&sample.to_le_bytes());
    }
    pcm
}
