//! Scaler Adapter - applies a fitted standardization
//!
//! Statistics come from training time; nothing is fitted here.

use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{ThreatError, ThreatResult};
use crate::features::{FeatureVector, FEATURE_COUNT, FEATURE_LAYOUT};

/// Per-feature `(x - mean) / scale`, as exported from a fitted StandardScaler.
///
/// Both vectors always hold `FEATURE_COUNT` finite values; every
/// constructor, deserialization included, goes through `new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScalerExport")]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// On-disk shape of `scaler.json`
#[derive(Deserialize)]
struct ScalerExport {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl TryFrom<ScalerExport> for StandardScaler {
    type Error = ThreatError;

    fn try_from(export: ScalerExport) -> ThreatResult<Self> {
        Self::new(export.mean, export.scale)
    }
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> ThreatResult<Self> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Mean 0, scale 1
    pub fn identity() -> Self {
        Self {
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        }
    }

    /// Load `{"mean": [...], "scale": [...]}`
    pub fn from_file(path: &Path) -> ThreatResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ThreatError::ArtifactIo {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|e| ThreatError::ArtifactFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    fn validate(&self) -> ThreatResult<()> {
        for params in [&self.mean, &self.scale] {
            if params.len() != FEATURE_COUNT {
                return Err(ThreatError::LengthMismatch {
                    expected: FEATURE_COUNT,
                    actual: params.len(),
                });
            }
        }
        for params in [&self.mean, &self.scale] {
            if let Some(i) = params.iter().position(|v| !v.is_finite()) {
                return Err(ThreatError::NonFiniteFeature {
                    name: FEATURE_LAYOUT[i],
                    value: params[i],
                });
            }
        }
        Ok(())
    }

    /// Transform one sample into a `(1, FEATURE_COUNT)` batch
    pub fn transform(&self, features: &FeatureVector) -> Array2<f32> {
        let mut batch = Array2::<f32>::zeros((1, FEATURE_COUNT));

        for (i, value) in features.as_slice().iter().enumerate() {
            // Constant features were fitted with scale 0; sklearn divides by 1.
            let scale = match self.scale[i] {
                s if s == 0.0 => 1.0,
                s => s,
            };
            batch[[0, i]] = ((value - self.mean[i]) / scale) as f32;
        }

        batch
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::identity()
    }
}
