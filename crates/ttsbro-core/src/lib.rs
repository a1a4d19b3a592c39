pub mod config;
pub mod error;
pub mod registry;
pub mod types;

pub use config::{AppConfig, DefaultsConfig, EngineConfig, KokoroConfig, SinkConfig};
pub use error::{
    ConfigError, EncodingError, EngineError, ItemError, NodeError, SinkError, ValidationError,
};
pub use registry::FactoryRegistry;
pub use types::{
    BinaryAttachment, ItemJson, ItemMetadata, ItemParams, OutputFormat, OutputItem,
    StoredAttachment, SynthesisRequest, SynthesizedAudio, Voice, VoiceParam, DEFAULT_SAMPLE_RATE,
    MAX_SPEED, MIN_SPEED,
};
