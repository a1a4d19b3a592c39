use async_trait::async_trait;
use ttsbro_core::{BinaryAttachment, ItemMetadata, SinkError, StoredAttachment};

/// Where encoded audio goes once an item has been synthesized.
///
/// Implementations are registered via [`SinkRegistry`](crate::SinkRegistry)
/// and receive each attachment through [`store`](Self::store) together with
/// the item's position in the batch and its metadata.
#[async_trait]
pub trait AttachmentSink: Send + Sync {
    /// Returns the sink's plugin name (e.g. `"file"`, `"inline"`).
    fn name(&self) -> &str;
    /// One-time initialisation with sink-specific TOML configuration.
    async fn initialize(&mut self, config: toml::Value) -> Result<(), SinkError>;
    /// Persist one attachment and report where it ended up.
    async fn store(
        &self,
        item_index: usize,
        attachment: &BinaryAttachment,
        metadata: &ItemMetadata,
    ) -> Result<StoredAttachment, SinkError>;
    /// Flush and release resources.
    async fn shutdown(&self) -> Result<(), SinkError>;
}
