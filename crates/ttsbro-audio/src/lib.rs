pub mod pcm;
pub mod wav;

pub use pcm::{encode_raw_pcm, quantize_sample, write_pcm16, BYTES_PER_SAMPLE};
pub use wav::{encode_wav, WAV_HEADER_LEN};

use ttsbro_core::{EncodingError, OutputFormat};

/// Encode samples in the requested output format.
pub fn encode(
    format: OutputFormat,
    samples: &[f32],
    sample_rate: u32,
) -> Result<Vec<u8>, EncodingError> {
    let bytes = match format {
        OutputFormat::Wav => encode_wav(samples, sample_rate)?,
        OutputFormat::Raw => encode_raw_pcm(samples),
    };
    tracing::trace!(
        format = %format,
        samples = samples.len(),
        bytes = bytes.len(),
        "encoded audio"
    );
    Ok(bytes)
}
