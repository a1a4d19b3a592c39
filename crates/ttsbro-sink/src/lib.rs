pub mod file_sink;
pub mod inline_sink;
pub mod registry;
pub mod sink_trait;

pub use file_sink::FileSink;
pub use inline_sink::InlineSink;
pub use registry::SinkRegistry;
pub use sink_trait::AttachmentSink;
