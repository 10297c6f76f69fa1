//! Inference Engine
//!
//! Logits → softmax → arg-max over the class catalog.
//! Backends (dense ndarray pass, ONNX Runtime) plug in through `Classifier`.

use std::time::Instant;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::catalog::ClassCatalog;
use super::types::{Prediction, PredictionMethod, ProbabilityDistribution};
use crate::error::{ThreatError, ThreatResult};

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Backend that turns one scaled `(1, FEATURE_COUNT)` batch into raw logits.
///
/// Implementations are loaded once and must not change between calls.
pub trait Classifier: Send + Sync {
    fn logits(&self, batch: &Array2<f32>) -> ThreatResult<Vec<f32>>;

    fn kind(&self) -> ModelKind;

    /// Trainable parameter count, when the backend can report it
    fn parameter_count(&self) -> Option<usize> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// In-crate forward pass over exported dense weights
    Dense,
    /// ONNX Runtime session
    Onnx,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Dense => "dense",
            ModelKind::Onnx => "onnx",
        }
    }
}

// ============================================================================
// SOFTMAX
// ============================================================================

/// `p_i = exp(l_i) / Σ_j exp(l_j)`, computed in f64 with the max shifted out
pub fn softmax(logits: &[f32]) -> Vec<f64> {
    let max = logits
        .iter()
        .map(|&l| f64::from(l))
        .fold(f64::NEG_INFINITY, f64::max);

    let exps: Vec<f64> = logits.iter().map(|&l| (f64::from(l) - max).exp()).collect();
    let total: f64 = exps.iter().sum();

    exps.into_iter().map(|e| e / total).collect()
}

// ============================================================================
// PREDICTION
// ============================================================================

/// Run the classifier on a scaled batch and build the prediction
pub fn infer(
    classifier: &dyn Classifier,
    batch: &Array2<f32>,
    catalog: &ClassCatalog,
) -> ThreatResult<Prediction> {
    let start_time = Instant::now();

    let logits = classifier.logits(batch)?;

    if logits.len() != catalog.len() {
        return Err(ThreatError::Inference(format!(
            "model produced {} logits for {} classes",
            logits.len(),
            catalog.len()
        )));
    }
    if let Some(bad) = logits.iter().find(|l| !l.is_finite()) {
        return Err(ThreatError::Inference(format!("non-finite logit {}", bad)));
    }

    let probabilities = ProbabilityDistribution::from_catalog(catalog, softmax(&logits));
    let inference_time = start_time.elapsed().as_micros() as u64;

    Prediction::from_distribution(probabilities, PredictionMethod::Model, inference_time)
        .ok_or_else(|| ThreatError::Inference("empty probability distribution".to_string()))
}
