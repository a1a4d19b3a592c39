//! Kokoro model bundle layout and lookup.
//!
//! A bundle directory holds the int8 ONNX weights, the speaker embeddings,
//! the token vocabulary and the espeak-ng phoneme data. Candidate locations
//! come from configuration; nothing here guesses install layouts.

use std::path::{Path, PathBuf};
use ttsbro_core::EngineError;

pub const MODEL_FILE: &str = "model.int8.onnx";
pub const VOICES_FILE: &str = "voices.bin";
pub const TOKENS_FILE: &str = "tokens.txt";
pub const DATA_DIR: &str = "espeak-ng-data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelBundle {
    pub dir: PathBuf,
    pub model: PathBuf,
    pub voices: PathBuf,
    pub tokens: PathBuf,
    pub data_dir: PathBuf,
}

impl ModelBundle {
    /// Validate a single bundle directory.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Result<Self, EngineError> {
        let dir = dir.into();
        let bundle = Self {
            model: dir.join(MODEL_FILE),
            voices: dir.join(VOICES_FILE),
            tokens: dir.join(TOKENS_FILE),
            data_dir: dir.join(DATA_DIR),
            dir,
        };

        let files = [
            (MODEL_FILE, &bundle.model),
            (VOICES_FILE, &bundle.voices),
            (TOKENS_FILE, &bundle.tokens),
        ];
        for (name, path) in files {
            if !path.is_file() {
                return Err(EngineError::ResourceNotFound {
                    missing: name.to_string(),
                    searched: vec![bundle.dir.clone()],
                });
            }
        }
        if !bundle.data_dir.is_dir() {
            return Err(EngineError::ResourceNotFound {
                missing: DATA_DIR.to_string(),
                searched: vec![bundle.dir.clone()],
            });
        }
        Ok(bundle)
    }

    /// Pick the first candidate containing the model weights, then validate it.
    ///
    /// When no candidate holds the weights the error lists every path tried.
    pub fn locate<P: AsRef<Path>>(candidates: &[P]) -> Result<Self, EngineError> {
        for candidate in candidates {
            let dir = candidate.as_ref();
            if dir.join(MODEL_FILE).is_file() {
                tracing::debug!(dir = %dir.display(), "found Kokoro model bundle");
                return Self::from_dir(dir);
            }
            tracing::trace!(dir = %dir.display(), "no model bundle here");
        }
        Err(EngineError::ResourceNotFound {
            missing: MODEL_FILE.to_string(),
            searched: candidates.iter().map(|p| p.as_ref().to_path_buf()).collect(),
        })
    }
}
