use crate::sink_trait::AttachmentSink;
use ttsbro_core::{FactoryRegistry, SinkError};

pub struct SinkRegistry {
    sinks: FactoryRegistry<dyn AttachmentSink>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        let mut sinks = FactoryRegistry::<dyn AttachmentSink>::new();
        sinks.register("file", || Box::new(crate::file_sink::FileSink::new()));
        sinks.register("inline", || Box::new(crate::inline_sink::InlineSink::new()));
        Self { sinks }
    }

    pub fn register(&mut self, name: &str, factory: fn() -> Box<dyn AttachmentSink>) {
        self.sinks.register(name, factory);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn AttachmentSink>, SinkError> {
        self.sinks
            .create(name)
            .ok_or_else(|| SinkError::NotFound(name.to_string()))
    }

    /// Create and initialise a sink in one step.
    pub async fn open(
        &self,
        name: &str,
        config: toml::Value,
    ) -> Result<Box<dyn AttachmentSink>, SinkError> {
        let mut sink = self.create(name)?;
        sink.initialize(config).await?;
        tracing::debug!(sink = %name, "attachment sink opened");
        Ok(sink)
    }

    pub fn list_sinks(&self) -> Vec<&str> {
        self.sinks.names()
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}
