use crate::sink_trait::AttachmentSink;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use ttsbro_core::{BinaryAttachment, ItemMetadata, SinkError, StoredAttachment};

/// Writes each attachment to `<dir>/<item index>_<file name>`.
pub struct FileSink {
    dir: Option<PathBuf>,
    store_count: AtomicUsize,
}

impl FileSink {
    pub fn new() -> Self {
        Self {
            dir: None,
            store_count: AtomicUsize::new(0),
        }
    }

    pub fn store_count(&self) -> usize {
        self.store_count.load(Ordering::Relaxed)
    }

    fn path_for(dir: &std::path::Path, item_index: usize, file_name: &str) -> PathBuf {
        dir.join(format!("{item_index:04}_{file_name}"))
    }
}

impl Default for FileSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttachmentSink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    async fn initialize(&mut self, config: toml::Value) -> Result<(), SinkError> {
        let dir = config
            .get("dir")
            .and_then(|v| v.as_str())
            .ok_or_else(|| SinkError::InitializationFailed("missing 'dir' in config".to_string()))?;
        let dir = PathBuf::from(dir);
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            SinkError::InitializationFailed(format!("cannot create {}: {e}", dir.display()))
        })?;
        tracing::debug!(dir = %dir.display(), "file sink ready");
        self.dir = Some(dir);
        Ok(())
    }

    async fn store(
        &self,
        item_index: usize,
        attachment: &BinaryAttachment,
        _metadata: &ItemMetadata,
    ) -> Result<StoredAttachment, SinkError> {
        let dir = self
            .dir
            .as_ref()
            .ok_or_else(|| SinkError::StoreFailed("not initialized".to_string()))?;
        let path = Self::path_for(dir, item_index, &attachment.file_name);

        tokio::fs::write(&path, &attachment.data)
            .await
            .map_err(|e| SinkError::StoreFailed(format!("{}: {e}", path.display())))?;

        self.store_count.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            item = item_index,
            path = %path.display(),
            bytes = attachment.data.len(),
            "attachment written"
        );
        Ok(StoredAttachment {
            file_name: attachment.file_name.clone(),
            mime_type: attachment.mime_type.clone(),
            file_size: attachment.data.len(),
            location: path.to_string_lossy().into_owned(),
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

    fn dir_config(dir: &std::path::Path) -> toml::Value {
        toml::Value::Table({
            let mut t = toml::map::Map::new();
            t.insert(
                "dir".to_string(),
                toml::Value::String(dir.to_string_lossy().to_string()),
            );
            t
        })
    }

    fn metadata(byte_length: usize) -> ItemMetadata {
        ItemMetadata {
            text: "hello".to_string(),
            voice: 0,
            speed: 1.0,
            format: OutputFormat::Wav,
            sample_rate: 24000,
            duration: 0.0,
            byte_length,
        }
    }

    #[test]
    fn test_file_sink_name() {
        let sink = FileSink::new();
        assert_eq!(sink.name(), "file");
    }

    #[tokio::test]
    async fn test_file_sink_initialize_missing_dir_fails() {
        let mut sink = FileSink::new();
        let result = sink.initialize(toml::Value::Table(Default::default())).await;
        match result {
            Err(SinkError::InitializationFailed(msg)) => assert!(msg.contains("dir")),
            _ => panic!("expected InitializationFailed"),
        }
    }

    #[tokio::test]
    async fn test_file_sink_initialize_creates_dir() {
        let dir = std::env::temp_dir().join("ttsbro_file_sink_create");
        let _ = std::fs::remove_dir_all(&dir);

        let mut sink = FileSink::new();
        sink.initialize(dir_config(&dir)).await.unwrap();
        assert!(dir.is_dir());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_file_sink_store_writes_bytes() {
        let dir = std::env::temp_dir().join("ttsbro_file_sink_store");
        let _ = std::fs::remove_dir_all(&dir);

        let mut sink = FileSink::new();
        sink.initialize(dir_config(&dir)).await.unwrap();

        let attachment = BinaryAttachment::new("audio", OutputFormat::Raw, vec![1, 2, 3, 4]);
        let stored = sink.store(7, &attachment, &metadata(4)).await.unwrap();

        let expected_path = dir.join("0007_tts_output.pcm");
        assert_eq!(stored.location, expected_path.to_string_lossy());
        assert_eq!(stored.file_name, "tts_output.pcm");
        assert_eq!(stored.mime_type, "audio/pcm");
        assert_eq!(stored.file_size, 4);
        assert_eq!(std::fs::read(&expected_path).unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(sink.store_count(), 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_file_sink_store_before_initialize_fails() {
        let sink = FileSink::new();
        let attachment = BinaryAttachment::new("audio", OutputFormat::Wav, vec![]);
        let result = sink.store(0, &attachment, &metadata(0)).await;
        assert!(matches!(result, Err(SinkError::StoreFailed(_))));
    }

    #[tokio::test]
    async fn test_file_sink_shutdown_succeeds() {
        let sink = FileSink::new();
        assert!(sink.shutdown().await.is_ok());
    }

    #[test]
    fn test_file_sink_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FileSink>();
    }
}
