//! Prediction Orchestrator
//!
//! Single entry point for both paths. Callers (CLI, smoke test) never need to
//! know whether the trained network or the heuristic scorer answered.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::artifacts::{self, ArtifactManifest, DetectorMode, LoadedArtifacts};
use super::fallback;
use super::inference::{self, ModelKind};
use super::types::Prediction;
use crate::config::DetectorConfig;
use crate::error::ThreatResult;
use crate::features::FeatureVector;

// ============================================================================
// STATELESS ENTRY POINTS
// ============================================================================

/// Model mode: scale → network → softmax. Fallback mode: heuristic on raw values.
pub fn predict(features: &FeatureVector, artifacts: &LoadedArtifacts) -> ThreatResult<Prediction> {
    let prediction = match artifacts {
        LoadedArtifacts::Model(model) => {
            let batch = model.scaler.transform(features);
            inference::infer(model.classifier.as_ref(), &batch, &model.catalog)?
        }
        LoadedArtifacts::Fallback { catalog } => fallback::predict(features, catalog)?,
    };

    log::debug!(
        "Predicted {} ({:.4}) via {} in {}us",
        prediction.label,
        prediction.confidence,
        prediction.method,
        prediction.inference_time_us
    );

    Ok(prediction)
}

/// Like `predict`, but a failing model run is answered by the heuristic
/// scorer so one bad sample cannot abort a batch.
pub fn predict_or_fallback(
    features: &FeatureVector,
    artifacts: &LoadedArtifacts,
) -> ThreatResult<Prediction> {
    match predict(features, artifacts) {
        Ok(prediction) => Ok(prediction),
        Err(e) => {
            log::warn!("Model inference failed ({}), using heuristic scorer", e);
            fallback::predict(features, artifacts.catalog())
        }
    }
}

// ============================================================================
// DETECTOR
// ============================================================================

/// Engine status for CLI output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub mode: DetectorMode,
    pub model_kind: Option<ModelKind>,
    pub parameter_count: Option<usize>,
    pub classes: Vec<String>,
    pub avg_latency_ms: f32,
    pub inference_count: u64,
}

/// Shared artifacts plus latency counters
#[derive(Debug)]
pub struct Detector {
    artifacts: Arc<LoadedArtifacts>,
    manifest: Option<ArtifactManifest>,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl Detector {
    /// Load artifacts per `config` (missing files → heuristic mode)
    pub fn init(config: &DetectorConfig) -> ThreatResult<Self> {
        let (artifacts, manifest) = artifacts::load(config)?;
        Ok(Self {
            artifacts: Arc::new(artifacts),
            manifest: Some(manifest),
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        })
    }

    /// Wrap artifacts that are already loaded (e.g. from an `ArtifactCache`)
    pub fn from_artifacts(artifacts: Arc<LoadedArtifacts>) -> Self {
        Self {
            artifacts,
            manifest: None,
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        }
    }

    pub fn artifacts(&self) -> &Arc<LoadedArtifacts> {
        &self.artifacts
    }

    pub fn manifest(&self) -> Option<&ArtifactManifest> {
        self.manifest.as_ref()
    }

    pub fn mode(&self) -> DetectorMode {
        self.artifacts.mode()
    }

    pub fn predict(&self, features: &FeatureVector) -> ThreatResult<Prediction> {
        let prediction = predict(features, &self.artifacts)?;
        self.track(&prediction);
        Ok(prediction)
    }

    pub fn predict_or_fallback(&self, features: &FeatureVector) -> ThreatResult<Prediction> {
        let prediction = predict_or_fallback(features, &self.artifacts)?;
        self.track(&prediction);
        Ok(prediction)
    }

    fn track(&self, prediction: &Prediction) {
        self.latency_sum_us
            .fetch_add(prediction.inference_time_us, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn status(&self) -> EngineStatus {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        EngineStatus {
            mode: self.artifacts.mode(),
            model_kind: self.artifacts.model_kind(),
            parameter_count: self.artifacts.parameter_count(),
            classes: self.artifacts.catalog().labels().to_vec(),
            avg_latency_ms: avg,
            inference_count: count,
        }
    }
}
