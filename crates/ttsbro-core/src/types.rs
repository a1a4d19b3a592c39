use crate::error::ValidationError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Sample rate assumed when an engine does not report one.
pub const DEFAULT_SAMPLE_RATE: u32 = 24000;

pub const MIN_SPEED: f32 = 0.5;
pub const MAX_SPEED: f32 = 2.0;

/// Mono float audio returned by a synthesis engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl SynthesizedAudio {
    /// Playback length in seconds, or 0 when the sample rate is unknown.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// The fixed set of speakers shipped with the Kokoro English model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Voice {
    #[default]
    AfDefault,
    Bella,
    Nicole,
    Sarah,
    Sky,
    Adam,
    Michael,
    Emma,
    Isabella,
    George,
    Lewis,
}

impl Voice {
    pub const ALL: [Voice; 11] = [
        Voice::AfDefault,
        Voice::Bella,
        Voice::Nicole,
        Voice::Sarah,
        Voice::Sky,
        Voice::Adam,
        Voice::Michael,
        Voice::Emma,
        Voice::Isabella,
        Voice::George,
        Voice::Lewis,
    ];

    /// Speaker id passed to the engine.
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: i64) -> Result<Self, ValidationError> {
        usize::try_from(id)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(ValidationError::UnsupportedVoice(id))
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Voice::AfDefault => "AF - Default (American Female)",
            Voice::Bella => "Bella (American Female)",
            Voice::Nicole => "Nicole (American Female)",
            Voice::Sarah => "Sarah (American Female)",
            Voice::Sky => "Sky (American Female)",
            Voice::Adam => "Adam (American Male)",
            Voice::Michael => "Michael (American Male)",
            Voice::Emma => "Emma (British Female)",
            Voice::Isabella => "Isabella (British Female)",
            Voice::George => "George (British Male)",
            Voice::Lewis => "Lewis (British Male)",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum OutputFormat {
    #[default]
    Wav,
    Raw,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Wav => "wav",
            OutputFormat::Raw => "raw",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Wav => "wav",
            OutputFormat::Raw => "pcm",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Wav => "audio/wav",
            OutputFormat::Raw => "audio/pcm",
        }
    }

    pub fn file_name(self) -> String {
        format!("tts_output.{}", self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wav" => Ok(OutputFormat::Wav),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(ValidationError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A voice parameter as it appears in item JSON: `3` or `"3"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum VoiceParam {
    Id(i64),
    Text(String),
}

impl VoiceParam {
    pub fn resolve(&self) -> Result<Voice, ValidationError> {
        match self {
            VoiceParam::Id(id) => Voice::from_id(*id),
            VoiceParam::Text(s) => {
                let id = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| ValidationError::InvalidVoice(s.clone()))?;
                Voice::from_id(id)
            }
        }
    }
}

/// Raw per-item parameters. Unset fields fall back to configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemParams {
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub voice: Option<VoiceParam>,

    #[serde(default)]
    pub speed: Option<f32>,

    #[serde(default)]
    pub format: Option<String>,

    #[serde(default, alias = "binaryPropertyName")]
    pub binary_property: Option<String>,
}

impl ItemParams {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Read one item from its JSON object, field by field.
    ///
    /// A wrongly typed field is reported by name, so one bad item can be
    /// turned into an error item without rejecting the rest of the batch.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let object = value
            .as_object()
            .ok_or_else(|| ValidationError::InvalidItem(json_kind(value).to_string()))?;

        Ok(Self {
            text: field(object, &["text"])?,
            voice: field(object, &["voice"])?,
            speed: field(object, &["speed"])?,
            format: field(object, &["format"])?,
            binary_property: field(object, &["binary_property", "binaryPropertyName"])?,
        })
    }
}

fn field<T: DeserializeOwned>(
    object: &Map<String, Value>,
    names: &[&str],
) -> Result<Option<T>, ValidationError> {
    let Some((name, value)) = names
        .iter()
        .find_map(|name| object.get(*name).map(|v| (*name, v)))
    else {
        return Ok(None);
    };
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value.clone())
        .map(Some)
        .map_err(|e| ValidationError::InvalidParameter {
            field: name.to_string(),
            reason: e.to_string(),
        })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A validated request, ready for the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: Voice,
    pub speed: f32,
    pub format: OutputFormat,
    pub binary_property: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetadata {
    pub text: String,
    pub voice: u8,
    pub speed: f32,
    pub format: OutputFormat,
    pub sample_rate: u32,
    pub duration: f64,
    pub byte_length: usize,
}

/// Encoded audio plus the naming it is stored under.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryAttachment {
    pub property: String,
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl BinaryAttachment {
    pub fn new(property: &str, format: OutputFormat, data: Vec<u8>) -> Self {
        Self {
            property: property.to_string(),
            file_name: format.file_name(),
            mime_type: format.mime_type().to_string(),
            data,
        }
    }
}

/// What a sink reports back after persisting an attachment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAttachment {
    pub file_name: String,
    pub mime_type: String,
    pub file_size: usize,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ItemJson {
    Success(ItemMetadata),
    Error { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputItem {
    pub json: ItemJson,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub binary: BTreeMap<String, StoredAttachment>,
}

impl OutputItem {
    pub fn success(metadata: ItemMetadata, property: &str, stored: StoredAttachment) -> Self {
        let mut binary = BTreeMap::new();
        binary.insert(property.to_string(), stored);
        Self {
            json: ItemJson::Success(metadata),
            binary,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            json: ItemJson::Error {
                error: message.into(),
            },
            binary: BTreeMap::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.json, ItemJson::Error { .. })
    }
}
