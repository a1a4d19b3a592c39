use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Text parameter is required")]
    MissingText,

    #[error("unsupported voice id {0} (expected 0..=10)")]
    UnsupportedVoice(i64),

    #[error("invalid voice value '{0}' (expected a speaker id 0..=10)")]
    InvalidVoice(String),

    #[error("speed {0} out of range (expected 0.5..=2.0)")]
    SpeedOutOfRange(f32),

    #[error("unsupported output format '{0}' (expected 'wav' or 'raw')")]
    UnsupportedFormat(String),

    #[error("binary property name must not be empty")]
    MissingBinaryProperty,

    #[error("invalid '{field}' parameter: {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("item must be a JSON object, got {0}")]
    InvalidItem(String),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("model bundle not found: missing {missing}; searched: {}", join_paths(.searched))]
    ResourceNotFound {
        missing: String,
        searched: Vec<PathBuf>,
    },

    #[error("TTS initialization failed: {0}")]
    InitializationFailed(String),

    #[error("speech synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("TTS engine not found: {0}")]
    EngineNotFound(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("sample rate must be positive")]
    ZeroSampleRate,

    #[error("WAV header field '{field}' overflows u32 ({value})")]
    HeaderOverflow { field: &'static str, value: u64 },
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("attachment sink initialization failed: {0}")]
    InitializationFailed(String),

    #[error("failed to store attachment: {0}")]
    StoreFailed(String),

    #[error("attachment sink not found: {0}")]
    NotFound(String),
}

/// Failure while processing a single workflow item.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("item {index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: ItemError,
    },
}

fn join_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "(no candidate paths configured)".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
