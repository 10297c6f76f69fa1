//! Configuration module
//!
//! Resolves artifact locations from the environment, falling back to the
//! defaults in `constants.rs`.

use std::env;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_LABEL_ENCODER_FILE, DEFAULT_MODEL_DIR, DEFAULT_ONNX_MODEL_FILE,
    DEFAULT_SCALER_FILE, DEFAULT_WEIGHTS_FILE,
};

/// Detector configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Directory holding the model artifacts
    pub model_dir: PathBuf,

    /// Scaler export, relative to `model_dir`
    pub scaler_file: String,

    /// Label encoder export, relative to `model_dir`
    pub label_encoder_file: String,

    /// ONNX model, relative to `model_dir`
    pub onnx_model_file: String,

    /// Dense weight export, relative to `model_dir`
    pub weights_file: String,

    /// Skip the trained model and always use the heuristic scorer
    pub force_fallback: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            scaler_file: DEFAULT_SCALER_FILE.to_string(),
            label_encoder_file: DEFAULT_LABEL_ENCODER_FILE.to_string(),
            onnx_model_file: DEFAULT_ONNX_MODEL_FILE.to_string(),
            weights_file: DEFAULT_WEIGHTS_FILE.to_string(),
            force_fallback: false,
        }
    }
}

impl DetectorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            model_dir: env::var("THREAT_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_DIR)),

            scaler_file: env::var("THREAT_SCALER_FILE")
                .unwrap_or_else(|_| DEFAULT_SCALER_FILE.to_string()),

            label_encoder_file: env::var("THREAT_LABEL_ENCODER_FILE")
                .unwrap_or_else(|_| DEFAULT_LABEL_ENCODER_FILE.to_string()),

            onnx_model_file: env::var("THREAT_ONNX_MODEL_FILE")
                .unwrap_or_else(|_| DEFAULT_ONNX_MODEL_FILE.to_string()),

            weights_file: env::var("THREAT_WEIGHTS_FILE")
                .unwrap_or_else(|_| DEFAULT_WEIGHTS_FILE.to_string()),

            force_fallback: env::var("THREAT_FORCE_FALLBACK")
                .map(|s| parse_flag(&s))
                .unwrap_or(false),
        }
    }

    /// Use artifacts from a specific directory with default file names
    pub fn with_model_dir(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.model_dir.join(&self.scaler_file)
    }

    pub fn label_encoder_path(&self) -> PathBuf {
        self.model_dir.join(&self.label_encoder_file)
    }

    pub fn onnx_model_path(&self) -> PathBuf {
        self.model_dir.join(&self.onnx_model_file)
    }

    pub fn weights_path(&self) -> PathBuf {
        self.model_dir.join(&self.weights_file)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
