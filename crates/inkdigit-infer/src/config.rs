use crate::{Device, InferError, PreprocessConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for the recognizer and the binaries that host it.
///
/// Every field has a default, so `{}` is a valid config file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RecognizerConfig {
    pub model_path: PathBuf,
    /// `cpu`, `cuda` or `cuda:<id>`.
    pub device: String,
    pub dpi: f32,
    pub width: usize,
    pub height: usize,
    pub invert: bool,
    /// Where to dump the 28×28 intermediate bitmap; no dump when unset.
    pub diagnostic_path: Option<PathBuf>,
    /// Directory for daily log files; stdout when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("assets/mnist.onnx"),
            device: "cpu".to_string(),
            dpi: 96.0,
            width: 28,
            height: 28,
            invert: false,
            diagnostic_path: None,
            log_dir: None,
        }
    }
}

impl RecognizerConfig {
    pub fn from_json(json: &str) -> Result<Self, InferError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| InferError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    pub fn device(&self) -> Result<Device, InferError> {
        self.device.parse()
    }

    pub fn preprocess(&self) -> PreprocessConfig {
        PreprocessConfig {
            width: self.width,
            height: self.height,
            invert: self.invert,
        }
    }
}
