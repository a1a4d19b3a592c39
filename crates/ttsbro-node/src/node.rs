use crate::params::resolve_request;
use ttsbro_core::{
    BinaryAttachment, DefaultsConfig, ItemError, ItemMetadata, ItemParams, NodeError, OutputItem,
    ValidationError,
};
use ttsbro_engine::SynthesisService;
use ttsbro_sink::AttachmentSink;

#[derive(Debug, Clone, Default)]
pub struct NodeOptions {
    pub defaults: DefaultsConfig,
    /// Turn per-item failures into `{ "error": ... }` items instead of aborting.
    pub continue_on_fail: bool,
}

/// Text-to-speech workflow node.
///
/// Borrows an already-initialised engine and sink; items are processed one
/// at a time, in order.
pub struct TtsNode<'a> {
    service: &'a SynthesisService,
    sink: &'a dyn AttachmentSink,
    options: NodeOptions,
}

impl<'a> TtsNode<'a> {
    pub fn new(
        service: &'a SynthesisService,
        sink: &'a dyn AttachmentSink,
        options: NodeOptions,
    ) -> Self {
        Self {
            service,
            sink,
            options,
        }
    }

    /// Run every item through synthesis, encoding and the sink.
    ///
    /// # Errors
    /// With `continue_on_fail` off, the first failing item aborts the batch
    /// and no later item is processed.
    pub async fn execute(&self, items: &[ItemParams]) -> Result<Vec<OutputItem>, NodeError> {
        self.run(items.iter().map(|params| Ok(params.clone()))).await
    }

    /// Like [`execute`](Self::execute), for items still in JSON form.
    ///
    /// Each value is read into [`ItemParams`] on its own, so a wrongly typed
    /// field fails only that item.
    pub async fn execute_json(
        &self,
        items: &[serde_json::Value],
    ) -> Result<Vec<OutputItem>, NodeError> {
        self.run(items.iter().map(ItemParams::from_json)).await
    }

    async fn run<I>(&self, items: I) -> Result<Vec<OutputItem>, NodeError>
    where
        I: ExactSizeIterator<Item = Result<ItemParams, ValidationError>>,
    {
        let mut output = Vec::with_capacity(items.len());

        for (index, params) in items.enumerate() {
            let result = match params {
                Ok(params) => self.process_item(index, &params).await,
                Err(e) => Err(ItemError::from(e)),
            };
            match result {
                Ok(item) => output.push(item),
                Err(source) if self.options.continue_on_fail => {
                    tracing::warn!(item = index, "item failed, continuing: {source}");
                    output.push(OutputItem::error(source.to_string()));
                }
                Err(source) => {
                    tracing::error!(item = index, "item failed, aborting batch: {source}");
                    return Err(NodeError::Item { index, source });
                }
            }
        }

        tracing::info!(items = output.len(), "batch complete");
        Ok(output)
    }

    async fn process_item(
        &self,
        index: usize,
        params: &ItemParams,
    ) -> Result<OutputItem, ItemError> {
        let request = resolve_request(params, &self.options.defaults)?;

        let audio = self
            .service
            .generate(&request.text, request.voice, request.speed)
            .await?;
        let data = ttsbro_audio::encode(request.format, &audio.samples, audio.sample_rate)?;

        let metadata = ItemMetadata {
            text: request.text,
            voice: request.voice.id(),
            speed: request.speed,
            format: request.format,
            sample_rate: audio.sample_rate,
            duration: audio.duration_secs(),
            byte_length: data.len(),
        };
        let attachment = BinaryAttachment::new(&request.binary_property, request.format, data);
        let stored = self.sink.store(index, &attachment, &metadata).await?;

        tracing::debug!(
            item = index,
            voice = metadata.voice,
            format = %metadata.format,
            bytes = metadata.byte_length,
            duration = metadata.duration,
            "item synthesized"
        );
        Ok(OutputItem::success(metadata, &attachment.property, stored))
    }
}
