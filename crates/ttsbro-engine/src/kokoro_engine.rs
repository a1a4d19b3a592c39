use crate::bundle::ModelBundle;
use crate::engine_trait::SynthesisEngine;
use async_trait::async_trait;
use sherpa_rs::tts::{CommonTtsConfig, KokoroTts, KokoroTtsConfig};
use sherpa_rs::OnnxConfig;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use ttsbro_core::{EngineError, KokoroConfig, SynthesizedAudio, Voice};

/// Kokoro TTS through sherpa-onnx.
///
/// The model is loaded once in `initialize`; every later request reuses it.
pub struct KokoroEngine {
    bundle: Option<ModelBundle>,
    tts: Option<Mutex<KokoroTts>>,
}

impl KokoroEngine {
    pub fn new() -> Self {
        Self {
            bundle: None,
            tts: None,
        }
    }

    pub fn bundle(&self) -> Option<&ModelBundle> {
        self.bundle.as_ref()
    }
}

impl Default for KokoroEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn to_i32(key: &str, value: u32) -> Result<i32, EngineError> {
    i32::try_from(value)
        .map_err(|_| EngineError::InitializationFailed(format!("'{key}' is too large: {value}")))
}

fn tts_config(bundle: &ModelBundle, config: &KokoroConfig) -> Result<KokoroTtsConfig, EngineError> {
    Ok(KokoroTtsConfig {
        model: path_string(&bundle.model),
        voices: path_string(&bundle.voices),
        tokens: path_string(&bundle.tokens),
        data_dir: path_string(&bundle.data_dir),
        length_scale: config.length_scale,
        onnx_config: OnnxConfig {
            provider: config.provider.clone(),
            num_threads: to_i32("num_threads", config.num_threads)?,
            ..Default::default()
        },
        common_config: CommonTtsConfig {
            max_num_sentences: to_i32("max_num_sentences", config.max_num_sentences)?,
            ..Default::default()
        },
        ..Default::default()
    })
}

#[async_trait]
impl SynthesisEngine for KokoroEngine {
    fn name(&self) -> &str {
        "kokoro"
    }

    async fn initialize(&mut self, config: toml::Value) -> Result<(), EngineError> {
        let config: KokoroConfig = config
            .try_into()
            .map_err(|e| EngineError::InitializationFailed(format!("invalid kokoro config: {e}")))?;

        let candidates: Vec<PathBuf> = match config.model_dir {
            Some(ref dir) => vec![PathBuf::from(dir)],
            None => config.search_paths.iter().map(PathBuf::from).collect(),
        };
        let bundle = ModelBundle::locate(&candidates)?;
        let tts = KokoroTts::new(tts_config(&bundle, &config)?);

        tracing::info!(
            model = %bundle.model.display(),
            num_threads = config.num_threads,
            provider = %config.provider,
            "KokoroEngine initialized"
        );
        self.bundle = Some(bundle);
        self.tts = Some(Mutex::new(tts));
        Ok(())
    }

    async fn synthesize(
        &self,
        text: &str,
        voice: Voice,
        speed: f32,
    ) -> Result<SynthesizedAudio, EngineError> {
        let tts = self
            .tts
            .as_ref()
            .ok_or_else(|| EngineError::SynthesisFailed("not initialized".to_string()))?;
        let mut tts = tts
            .lock()
            .map_err(|_| EngineError::SynthesisFailed("kokoro model lock poisoned".to_string()))?;

        let audio = tts
            .create(text, i32::from(voice.id()), speed)
            .map_err(|e| EngineError::SynthesisFailed(e.to_string()))?;

        Ok(SynthesizedAudio {
            samples: audio.samples,
            // 0 lets the service fall back to the default rate
            sample_rate: u32::try_from(audio.sample_rate).unwrap_or(0),
        })
    }

    async fn shutdown(&self) -> Result<(), EngineError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> ModelBundle {
        let dir = PathBuf::from("/models/kokoro");
        ModelBundle {
            model: dir.join("model.int8.onnx"),
            voices: dir.join("voices.bin"),
            tokens: dir.join("tokens.txt"),
            data_dir: dir.join("espeak-ng-data"),
            dir,
        }
    }

    fn kokoro_config(toml_str: &str) -> KokoroConfig {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_kokoro_engine_name() {
        let engine = KokoroEngine::new();
        assert_eq!(engine.name(), "kokoro");
    }

    #[test]
    fn test_tts_config_maps_bundle_and_knobs() {
        let config = kokoro_config(
            r#"
num_threads = 4
provider = "cuda"
max_num_sentences = 2
length_scale = 1.25
"#,
        );
        let tts = tts_config(&bundle(), &config).unwrap();
        assert_eq!(tts.model, "/models/kokoro/model.int8.onnx");
        assert_eq!(tts.voices, "/models/kokoro/voices.bin");
        assert_eq!(tts.tokens, "/models/kokoro/tokens.txt");
        assert_eq!(tts.data_dir, "/models/kokoro/espeak-ng-data");
        assert_eq!(tts.length_scale, 1.25);
        assert_eq!(tts.onnx_config.provider, "cuda");
        assert_eq!(tts.onnx_config.num_threads, 4);
        assert_eq!(tts.common_config.max_num_sentences, 2);
    }

    #[test]
    fn test_tts_config_rejects_oversized_thread_count() {
        let mut config = kokoro_config("");
        config.num_threads = u32::MAX;
        assert!(matches!(
            tts_config(&bundle(), &config),
            Err(EngineError::InitializationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_kokoro_engine_missing_bundle_fails() {
        let mut engine = KokoroEngine::new();
        let mut table = toml::map::Map::new();
        table.insert(
            "model_dir".to_string(),
            toml::Value::String("/nonexistent/kokoro".to_string()),
        );
        let result = engine.initialize(toml::Value::Table(table)).await;
        match result {
            Err(EngineError::ResourceNotFound { searched, .. }) => {
                assert_eq!(searched, vec![PathBuf::from("/nonexistent/kokoro")]);
            }
            _ => panic!("expected ResourceNotFound"),
        }
        assert!(engine.bundle().is_none());
    }

    #[tokio::test]
    async fn test_kokoro_engine_synthesize_before_initialize_fails() {
        let engine = KokoroEngine::new();
        let result = engine.synthesize("hello", Voice::default(), 1.0).await;
        assert!(matches!(result, Err(EngineError::SynthesisFailed(_))));
    }

    #[test]
    fn test_kokoro_engine_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KokoroEngine>();
    }
}
