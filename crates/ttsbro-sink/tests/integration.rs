use ttsbro_core::{BinaryAttachment, ItemMetadata, OutputFormat};
use ttsbro_sink::SinkRegistry;

fn metadata(format: OutputFormat, byte_length: usize) -> ItemMetadata {
    ItemMetadata {
        text: "hello".to_string(),
        voice: 0,
        speed: 1.0,
        format,
        sample_rate: 24000,
        duration: 0.25,
        byte_length,
    }
}

fn file_config(dir: &std::path::Path) -> toml::Value {
    toml::Value::Table({
        let mut t = toml::map::Map::new();
        t.insert(
            "dir".to_string(),
            toml::Value::String(dir.to_string_lossy().to_string()),
        );
        t
    })
}

#[tokio::test]
async fn test_file_sink_keeps_items_apart() {
    let dir = std::env::temp_dir().join("ttsbro_sink_integ_items");
    let _ = std::fs::remove_dir_all(&dir);

    let registry = SinkRegistry::new();
    let sink = registry.open("file", file_config(&dir)).await.unwrap();

    let first = BinaryAttachment::new("audio", OutputFormat::Wav, vec![1; 46]);
    let second = BinaryAttachment::new("audio", OutputFormat::Wav, vec![2; 48]);
    let a = sink
        .store(0, &first, &metadata(OutputFormat::Wav, 46))
        .await
        .unwrap();
    let b = sink
        .store(1, &second, &metadata(OutputFormat::Wav, 48))
        .await
        .unwrap();

    assert_ne!(a.location, b.location);
    assert_eq!(std::fs::read(&a.location).unwrap(), vec![1; 46]);
    assert_eq!(std::fs::read(&b.location).unwrap(), vec![2; 48]);

    sink.shutdown().await.unwrap();
    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_inline_sink_reports_size_and_mime() {
    let registry = SinkRegistry::new();
    let sink = registry
        .open("inline", toml::Value::Table(Default::default()))
        .await
        .unwrap();

    let attachment = BinaryAttachment::new("audio", OutputFormat::Raw, vec![0; 6]);
    let stored = sink
        .store(0, &attachment, &metadata(OutputFormat::Raw, 6))
        .await
        .unwrap();
    assert_eq!(stored.file_size, 6);
    assert_eq!(stored.mime_type, "audio/pcm");
    assert!(stored.location.starts_with("data:audio/pcm;base64,"));
}
