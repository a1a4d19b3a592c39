//! Canonical mono PCM16 RIFF/WAVE encoding.

use crate::pcm::{write_pcm16, BYTES_PER_SAMPLE};
use ttsbro_core::EncodingError;

/// Size of the fixed RIFF + fmt + data chunk headers.
pub const WAV_HEADER_LEN: usize = 44;

const NUM_CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;
const BLOCK_ALIGN: u16 = NUM_CHANNELS * (BITS_PER_SAMPLE / 8);
const FMT_CHUNK_SIZE: u32 = 16;
const FORMAT_PCM: u16 = 1;

/// Encodes mono samples as a 16-bit PCM WAV file.
///
/// The result is `44 + 2 * samples.len()` bytes: a fixed header followed by
/// the samples quantized with [`quantize_sample`](crate::quantize_sample).
///
/// # Errors
/// Returns [`EncodingError`] when `sample_rate` is zero or when a header field
/// would not fit in 32 bits.
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, EncodingError> {
    if sample_rate == 0 {
        return Err(EncodingError::ZeroSampleRate);
    }

    let data_size = samples.len() as u64 * BYTES_PER_SAMPLE as u64;
    let chunk_size = to_u32("ChunkSize", 36 + data_size)?;
    let data_size = to_u32("Subchunk2Size", data_size)?;
    let byte_rate = to_u32("ByteRate", u64::from(sample_rate) * u64::from(BLOCK_ALIGN))?;

    let mut out = Vec::with_capacity(WAV_HEADER_LEN + data_size as usize);

    // RIFF header
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&chunk_size.to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&FMT_CHUNK_SIZE.to_le_bytes());
    out.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    out.extend_from_slice(&NUM_CHANNELS.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&BLOCK_ALIGN.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());
    debug_assert_eq!(out.len(), WAV_HEADER_LEN);

    write_pcm16(&mut out, samples);
    Ok(out)
}

fn to_u32(field: &'static str, value: u64) -> Result<u32, EncodingError> {
    u32::try_from(value).map_err(|_| EncodingError::HeaderOverflow { field, value })
}
