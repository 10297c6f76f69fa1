//! LightweightANN - dense forward pass
//!
//! Runs the exported PyTorch weights directly with ndarray:
//! `Linear → ReLU` for every hidden layer, plain `Linear` for the output.
//! Dropout layers are identity at inference and are not represented.

use std::path::Path;

use ndarray::{Array1, Array2};
use serde::Deserialize;

use super::inference::{Classifier, ModelKind};
use crate::constants::HIDDEN_LAYERS;
use crate::error::{ThreatError, ThreatResult};

// ============================================================================
// EXPORT FORMAT
// ============================================================================

/// `nn.Linear` as exported from a state_dict: weight is `[out][in]`
#[derive(Debug, Deserialize)]
struct LinearExport {
    weight: Vec<Vec<f32>>,
    bias: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct NetworkExport {
    layers: Vec<LinearExport>,
}

// ============================================================================
// LAYERS
// ============================================================================

#[derive(Debug, Clone)]
pub struct DenseLayer {
    /// Shape `(out, in)`
    weight: Array2<f32>,
    bias: Array1<f32>,
}

impl DenseLayer {
    pub fn new(weight: Array2<f32>, bias: Array1<f32>) -> ThreatResult<Self> {
        if weight.nrows() != bias.len() {
            return Err(ThreatError::Architecture(format!(
                "layer has {} output rows but {} biases",
                weight.nrows(),
                bias.len()
            )));
        }
        Ok(Self { weight, bias })
    }

    fn from_export(export: LinearExport) -> ThreatResult<Self> {
        let rows = export.weight.len();
        let cols = export.weight.first().map(Vec::len).unwrap_or(0);
        if export.weight.iter().any(|row| row.len() != cols) {
            return Err(ThreatError::Architecture("ragged weight matrix".to_string()));
        }

        let flat: Vec<f32> = export.weight.into_iter().flatten().collect();
        let weight = Array2::from_shape_vec((rows, cols), flat)
            .map_err(|e| ThreatError::Architecture(format!("weight shape: {}", e)))?;

        Self::new(weight, Array1::from(export.bias))
    }

    pub fn input_size(&self) -> usize {
        self.weight.ncols()
    }

    pub fn output_size(&self) -> usize {
        self.weight.nrows()
    }

    pub fn parameter_count(&self) -> usize {
        self.weight.len() + self.bias.len()
    }

    /// `x · Wᵀ + b` for a `(batch, in)` input
    fn forward(&self, x: &Array2<f32>) -> Array2<f32> {
        let mut z = x.dot(&self.weight.t());
        z += &self.bias;
        z
    }
}

// ============================================================================
// NETWORK
// ============================================================================

#[derive(Debug, Clone)]
pub struct DenseNetwork {
    layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    /// Chain layers; each layer's input must match the previous output
    pub fn new(layers: Vec<DenseLayer>) -> ThreatResult<Self> {
        if layers.is_empty() {
            return Err(ThreatError::Architecture("network has no layers".to_string()));
        }
        for (i, pair) in layers.windows(2).enumerate() {
            if pair[0].output_size() != pair[1].input_size() {
                return Err(ThreatError::Architecture(format!(
                    "layer {} outputs {} values but layer {} expects {}",
                    i,
                    pair[0].output_size(),
                    i + 1,
                    pair[1].input_size()
                )));
            }
        }
        Ok(Self { layers })
    }

    /// Load `{"layers": [{"weight": [[..]], "bias": [..]}, ..]}`
    pub fn from_file(path: &Path) -> ThreatResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ThreatError::ArtifactIo {
            path: path.to_path_buf(),
            source,
        })?;

        let export: NetworkExport =
            serde_json::from_str(&content).map_err(|e| ThreatError::ArtifactFormat {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let layers = export
            .layers
            .into_iter()
            .map(DenseLayer::from_export)
            .collect::<ThreatResult<Vec<_>>>()?;

        Self::new(layers)
    }

    /// Check the LightweightANN shape: inputs → 256 → 128 → 64 → classes
    pub fn ensure_architecture(&self, inputs: usize, classes: usize) -> ThreatResult<()> {
        let expected: Vec<usize> = std::iter::once(inputs)
            .chain(HIDDEN_LAYERS)
            .chain(std::iter::once(classes))
            .collect();
        let actual = self.widths();

        if actual != expected {
            return Err(ThreatError::Architecture(format!(
                "expected widths {:?}, found {:?}",
                expected, actual
            )));
        }
        Ok(())
    }

    /// Input width followed by every layer's output width
    pub fn widths(&self) -> Vec<usize> {
        std::iter::once(self.layers[0].input_size())
            .chain(self.layers.iter().map(DenseLayer::output_size))
            .collect()
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].input_size()
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].output_size()
    }
}

impl Classifier for DenseNetwork {
    fn logits(&self, batch: &Array2<f32>) -> ThreatResult<Vec<f32>> {
        if batch.nrows() != 1 || batch.ncols() != self.input_size() {
            return Err(ThreatError::Inference(format!(
                "expected a (1, {}) batch, got {:?}",
                self.input_size(),
                batch.shape()
            )));
        }

        let last = self.layers.len() - 1;
        let mut x = batch.clone();
        for (i, layer) in self.layers.iter().enumerate() {
            x = layer.forward(&x);
            if i < last {
                x.mapv_inplace(|v| v.max(0.0));
            }
        }

        Ok(x.row(0).to_vec())
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Dense
    }

    fn parameter_count(&self) -> Option<usize> {
        Some(self.layers.iter().map(DenseLayer::parameter_count).sum())
    }
}
