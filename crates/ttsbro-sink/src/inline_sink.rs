use crate::sink_trait::AttachmentSink;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ttsbro_core::{BinaryAttachment, ItemMetadata, SinkError, StoredAttachment};

/// Embeds the attachment in the output item as a base64 `data:` URI.
#[derive(Default)]
pub struct InlineSink;

impl InlineSink {
    pub fn new() -> Self {
        Self
    }

    pub fn data_uri(attachment: &BinaryAttachment) -> String {
        format!(
            "data:{};base64,{}",
            attachment.mime_type,
            STANDARD.encode(&attachment.data)
        )
    }
}

#[async_trait]
impl AttachmentSink for InlineSink {
    fn name(&self) -> &str {
        "inline"
    }

    async fn initialize(&mut self, _config: toml::Value) -> Result<(), SinkError> {
        Ok(())
    }

    async fn store(
        &self,
        _item_index: usize,
        attachment: &BinaryAttachment,
        _metadata: &ItemMetadata,
    ) -> Result<StoredAttachment, SinkError> {
        Ok(StoredAttachment {
            file_name: attachment.file_name.clone(),
            mime_type: attachment.mime_type.clone(),
            file_size: attachment.data.len(),
            location: Self::data_uri(attachment),
        })
    }

    async fn shutdown(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttsbro_core::OutputFormat;

    #[test]
    fn test_inline_sink_name() {
        assert_eq!(InlineSink::new().name(), "inline");
    }

    #[test]
    fn test_data_uri_format() {
        let attachment = BinaryAttachment::new("audio", OutputFormat::Wav, b"RIFF".to_vec());
        assert_eq!(InlineSink::data_uri(&attachment), "data:audio/wav;base64,UklGRg==");
    }

    #[tokio::test]
    async fn test_inline_sink_store_round_trips_bytes() {
        let sink = InlineSink::new();
        let data = vec![0u8, 1, 254, 255];
        let attachment = BinaryAttachment::new("speech", OutputFormat::Raw, data.clone());
        let metadata = ItemMetadata {
            text: "x".to_string(),
            voice: 2,
            speed: 1.0,
            format: OutputFormat::Raw,
            sample_rate: 24000,
            duration: 0.0,
            byte_length: data.len(),
        };
        let stored = sink.store(0, &attachment, &metadata).await.unwrap();
        let encoded = stored
            .location
            .strip_prefix("data:audio/pcm;base64,")
            .unwrap();
        assert_eq!(STANDARD.decode(encoded).unwrap(), data);
        assert_eq!(stored.file_size, 4);
    }
}
