use crate::engine_trait::SynthesisEngine;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use ttsbro_core::{EngineError, SynthesizedAudio, Voice, DEFAULT_SAMPLE_RATE};

const DEFAULT_SAMPLES_PER_CHAR: u32 = 1200;

/// Produces silence whose length scales with the text and speed.
///
/// Useful for exercising the pipeline without a model bundle.
pub struct NullEngine {
    sample_rate: u32,
    samples_per_char: u32,
    synth_count: AtomicUsize,
}

impl NullEngine {
    pub fn new() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            samples_per_char: DEFAULT_SAMPLES_PER_CHAR,
            synth_count: AtomicUsize::new(0),
        }
    }

    pub fn synth_count(&self) -> usize {
        self.synth_count.load(Ordering::Relaxed)
    }
}

impl Default for NullEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn read_u32(config: &toml::Value, key: &str) -> Result<Option<u32>, EngineError> {
    match config.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_integer()
            .and_then(|i| u32::try_from(i).ok())
            .filter(|&i| i > 0)
            .map(Some)
            .ok_or_else(|| {
                EngineError::InitializationFailed(format!(
                    "'{key}' must be a positive integer, got {v}"
                ))
            }),
    }
}

#[async_trait]
impl SynthesisEngine for NullEngine {
    fn name(&self) -> &str {
        "null"
    }

    async fn initialize(&mut self, config: toml::Value) -> Result<(), EngineError> {
        if let Some(rate) = read_u32(&config, "sample_rate")? {
            self.sample_rate = rate;
        }
        if let Some(n) = read_u32(&config, "samples_per_char")? {
            self.samples_per_char = n;
        }
        tracing::debug!(
            sample_rate = self.sample_rate,
            samples_per_char = self.samples_per_char,
            "NullEngine initialized"
        );
        Ok(())
    }

    async fn synthesize(
        &self,
        text: &str,
        voice: Voice,
        speed: f32,
    ) -> Result<SynthesizedAudio, EngineError> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(EngineError::SynthesisFailed(format!(
                "speed must be positive, got {speed}"
            )));
        }
        let chars = text.chars().count() as f64;
        let len = (chars * f64::from(self.samples_per_char) / f64::from(speed)).ceil() as usize;
        let count = self.synth_count.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::trace!(
            "NullEngine request #{count}: {len} samples for voice {}",
            voice.id()
        );
        Ok(SynthesizedAudio {
            samples: vec![0.0; len],
            sample_rate: self.sample_rate,
        })
    }

    async fn shutdown(&self) -> Result<(), EngineError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_engine_name() {
        let engine = NullEngine::new();
        assert_eq!(engine.name(), "null");
    }

    #[tokio::test]
    async fn test_null_engine_initialize_succeeds() {
        let mut engine = NullEngine::new();
        let result = engine
            .initialize(toml::Value::Table(Default::default()))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_null_engine_length_scales_with_text_and_speed() {
        let engine = NullEngine::new();
        let normal = engine.synthesize("abcd", Voice::default(), 1.0).await.unwrap();
        let fast = engine.synthesize("abcd", Voice::default(), 2.0).await.unwrap();
        assert_eq!(normal.samples.len(), 4 * 1200);
        assert_eq!(fast.samples.len(), 2 * 1200);
        assert_eq!(normal.sample_rate, 24000);
        assert!(normal.samples.iter().all(|&s| s == 0.0));
    }

    #[tokio::test]
    async fn test_null_engine_respects_config() {
        let mut engine = NullEngine::new();
        let mut table = toml::map::Map::new();
        table.insert("sample_rate".to_string(), toml::Value::Integer(16000));
        table.insert("samples_per_char".to_string(), toml::Value::Integer(10));
        engine.initialize(toml::Value::Table(table)).await.unwrap();

        let audio = engine.synthesize("hi", Voice::Adam, 1.0).await.unwrap();
        assert_eq!(audio.sample_rate, 16000);
        assert_eq!(audio.samples.len(), 20);
    }

    #[tokio::test]
    async fn test_null_engine_rejects_bad_config() {
        let mut engine = NullEngine::new();
        let mut table = toml::map::Map::new();
        table.insert("sample_rate".to_string(), toml::Value::Integer(0));
        let result = engine.initialize(toml::Value::Table(table)).await;
        match result {
            Err(EngineError::InitializationFailed(msg)) => assert!(msg.contains("sample_rate")),
            _ => panic!("expected InitializationFailed"),
        }
    }

    #[tokio::test]
    async fn test_null_engine_rejects_non_positive_speed() {
        let engine = NullEngine::new();
        let result = engine.synthesize("hi", Voice::default(), 0.0).await;
        assert!(matches!(result, Err(EngineError::SynthesisFailed(_))));
    }

    #[tokio::test]
    async fn test_null_engine_synth_count_increments() {
        let engine = NullEngine::new();
        for _ in 0..3 {
            engine.synthesize("x", Voice::default(), 1.0).await.unwrap();
        }
        assert_eq!(engine.synth_count(), 3);
    }

    #[test]
    fn test_null_engine_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NullEngine>();
    }
}
