use crate::error::ConfigError;
use crate::types::OutputFormat;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub sink: SinkConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit an error item and keep going instead of aborting the batch.
    #[serde(default)]
    pub continue_on_fail: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            continue_on_fail: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    #[serde(default = "default_engine_name")]
    pub name: String,

    #[serde(default)]
    pub kokoro: Option<KokoroConfig>,

    /// Per-engine tables other than `kokoro`, e.g. `[engine.null]`.
    #[serde(flatten)]
    pub extra: toml::Value,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: default_engine_name(),
            kokoro: None,
            extra: toml::Value::Table(Default::default()),
        }
    }
}

/// Location and runtime knobs for the Kokoro model bundle.
///
/// `model_dir` wins when set; otherwise `search_paths` are tried in order.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct KokoroConfig {
    #[serde(default)]
    pub model_dir: Option<String>,

    #[serde(default)]
    pub search_paths: Vec<String>,

    #[serde(default = "default_num_threads")]
    pub num_threads: u32,

    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default = "default_max_num_sentences")]
    pub max_num_sentences: u32,

    #[serde(default = "default_length_scale")]
    pub length_scale: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub voice: u8,

    #[serde(default = "default_speed")]
    pub speed: f32,

    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default = "default_binary_property")]
    pub binary_property: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            voice: 0,
            speed: default_speed(),
            format: OutputFormat::default(),
            binary_property: default_binary_property(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SinkConfig {
    #[serde(default = "default_sink_plugin")]
    pub plugin: String,

    #[serde(flatten)]
    pub extra: toml::Value,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            plugin: default_sink_plugin(),
            extra: toml::Value::Table(Default::default()),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_engine_name() -> String {
    "null".to_string()
}

fn default_num_threads() -> u32 {
    1
}

fn default_provider() -> String {
    "cpu".to_string()
}

fn default_max_num_sentences() -> u32 {
    1
}

fn default_length_scale() -> f32 {
    1.0
}

fn default_speed() -> f32 {
    1.0
}

fn default_binary_property() -> String {
    "audio".to_string()
}

fn default_sink_plugin() -> String {
    "inline".to_string()
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid"))
}

/// Interpolate `${VAR}` patterns with environment variable values.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut result = input.to_string();
    let mut errors = Vec::new();

    for cap in env_var_pattern().captures_iter(input) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(val) => {
                result = result.replace(&cap[0], &val);
            }
            Err(_) => {
                errors.push(var_name.to_string());
            }
        }
    }

    if let Some(first_missing) = errors.into_iter().next() {
        return Err(ConfigError::EnvVarNotFound(first_missing));
    }

    Ok(result)
}

impl AppConfig {
    /// Load configuration from a TOML file, with environment variable interpolation.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let interpolated = interpolate_env_vars(s)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        tracing::debug!(
            engine = %config.engine.name,
            sink = %config.sink.plugin,
            "configuration parsed"
        );
        Ok(config)
    }
}
