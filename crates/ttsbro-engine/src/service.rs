use crate::engine_trait::SynthesisEngine;
use crate::registry::EngineRegistry;
use ttsbro_core::{EngineError, SynthesizedAudio, Voice, DEFAULT_SAMPLE_RATE};

/// Long-lived handle to a single initialised engine.
///
/// Built once at startup and passed by reference to whatever issues requests,
/// so the engine is loaded at most once per process.
pub struct SynthesisService {
    engine: Box<dyn SynthesisEngine>,
}

impl SynthesisService {
    /// Create the named engine from `registry` and initialise it.
    pub async fn start(
        engine_name: &str,
        config: toml::Value,
        registry: &EngineRegistry,
    ) -> Result<Self, EngineError> {
        let engine = registry.create(engine_name)?;
        Self::with_engine(engine, config).await
    }

    /// Initialise an engine that was built outside the registry.
    pub async fn with_engine(
        mut engine: Box<dyn SynthesisEngine>,
        config: toml::Value,
    ) -> Result<Self, EngineError> {
        engine.initialize(config).await?;
        tracing::info!(engine = %engine.name(), "synthesis engine ready");
        Ok(Self { engine })
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Synthesize `text`, substituting the default sample rate when the engine
    /// reports none.
    pub async fn generate(
        &self,
        text: &str,
        voice: Voice,
        speed: f32,
    ) -> Result<SynthesizedAudio, EngineError> {
        let mut audio = self.engine.synthesize(text, voice, speed).await?;
        if audio.sample_rate == 0 {
            audio.sample_rate = DEFAULT_SAMPLE_RATE;
        }
        tracing::debug!(
            engine = %self.engine.name(),
            voice = voice.id(),
            speed,
            samples = audio.samples.len(),
            sample_rate = audio.sample_rate,
            "synthesized"
        );
        Ok(audio)
    }

    pub async fn shutdown(&self) -> Result<(), EngineError> {
        self.engine.shutdown().await
    }
}
