use async_trait::async_trait;
use ttsbro_core::{EngineError, SynthesizedAudio, Voice};

/// A text-to-speech backend that turns text into mono float samples.
///
/// Engines are created through [`EngineRegistry`](crate::EngineRegistry) and
/// initialised exactly once by [`SynthesisService`](crate::SynthesisService).
#[async_trait]
pub trait SynthesisEngine: Send + Sync {
    /// Returns the engine's plugin name (e.g. `"null"`, `"kokoro"`).
    fn name(&self) -> &str;
    /// One-time initialisation with engine-specific TOML configuration.
    async fn initialize(&mut self, config: toml::Value) -> Result<(), EngineError>;
    /// Synthesize `text` with the given speaker and speed multiplier.
    ///
    /// A returned `sample_rate` of 0 means "engine default".
    async fn synthesize(
        &self,
        text: &str,
        voice: Voice,
        speed: f32,
    ) -> Result<SynthesizedAudio, EngineError>;
    /// Release any resources held by the engine.
    async fn shutdown(&self) -> Result<(), EngineError>;
}
