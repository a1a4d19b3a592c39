//! Float to signed 16-bit PCM conversion.

/// Bytes written per quantized sample.
pub const BYTES_PER_SAMPLE: usize = 2;

const NEGATIVE_SCALE: f64 = 32768.0;
const POSITIVE_SCALE: f64 = 32767.0;

/// Quantizes one normalized sample to a signed 16-bit value.
///
/// The sample is clamped to `[-1.0, 1.0]`, then negative values are scaled by
/// 32768 and non-negative values by 32767 so that both ends of the `i16` range
/// are reachable. The scaled value is rounded half away from zero, so
/// `0.5 -> 16384` and `-1.0 / 65536.0 -> -1`.
///
/// `NaN` maps to `0`; infinities clamp like any other out-of-range value.
pub fn quantize_sample(sample: f32) -> i16 {
    if sample.is_nan() {
        return 0;
    }
    let s = f64::from(sample).clamp(-1.0, 1.0);
    let scaled = if s < 0.0 {
        s * NEGATIVE_SCALE
    } else {
        s * POSITIVE_SCALE
    };
    // Within [-32768, 32767] after clamping, so the cast never saturates.
    scaled.round() as i16
}

/// Appends the little-endian PCM16 encoding of `samples` to `out`.
pub fn write_pcm16(out: &mut Vec<u8>, samples: &[f32]) {
    out.reserve(samples.len() * BYTES_PER_SAMPLE);
    for &sample in samples {
        out.extend_from_slice(&quantize_sample(sample).to_le_bytes());
    }
}

/// Encodes samples as headerless little-endian PCM16.
///
/// The output is always exactly `2 * samples.len()` bytes.
pub fn encode_raw_pcm(samples: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * BYTES_PER_SAMPLE);
    write_pcm16(&mut out, samples);
    out
}
