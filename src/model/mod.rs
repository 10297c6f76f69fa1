//! Model Module - Threat Prediction Engine
//!
//! Tách logic inference khỏi feature schema.
//! - `artifacts` - load-once scaler / label encoder / network
//! - `inference` - classifier backends, softmax, arg-max
//! - `fallback`  - heuristic scorer used without trained artifacts
//! - `predictor` - the entry point that picks a path

pub mod artifacts;
pub mod catalog;
pub mod fallback;
pub mod inference;
pub mod network;
pub mod onnx;
pub mod predictor;
pub mod scaler;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export common types
pub use artifacts::{ArtifactCache, ArtifactManifest, DetectorMode, LoadedArtifacts, ModelArtifacts};
pub use catalog::ClassCatalog;
pub use fallback::{SuspicionScores, ThreatFamily};
pub use inference::{softmax, Classifier, ModelKind};
pub use network::{DenseLayer, DenseNetwork};
pub use onnx::OnnxClassifier;
pub use predictor::{predict, predict_or_fallback, Detector, EngineStatus};
pub use scaler::StandardScaler;
pub use types::{ClassProbability, Prediction, PredictionMethod, ProbabilityDistribution};
