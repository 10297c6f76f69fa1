//! ONNX Runtime backend
//!
//! Load và chạy ONNX export của LightweightANN.
//! The session is created once; `run` needs `&mut`, hence the mutex.

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::{Value, ValueType};
use parking_lot::Mutex;

use super::inference::{Classifier, ModelKind};
use crate::error::{ThreatError, ThreatResult};

pub struct OnnxClassifier {
    session: Mutex<Session>,
    output_name: String,
    /// Last dimension of the input / output tensors; `None` when dynamic
    input_width: Option<usize>,
    output_width: Option<usize>,
}

impl OnnxClassifier {
    /// Load ONNX model từ file
    pub fn from_file(model_path: &Path) -> ThreatResult<Self> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(ThreatError::ArtifactMissing(model_path.to_path_buf()));
        }

        let session = Session::builder()
            .map_err(|e| ThreatError::Inference(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ThreatError::Inference(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| ThreatError::ArtifactFormat {
                path: model_path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Self::from_session(session)
    }

    fn from_session(session: Session) -> ThreatResult<Self> {
        let input = session
            .inputs
            .first()
            .ok_or_else(|| ThreatError::Architecture("ONNX model defines no input".to_string()))?;
        let output = session
            .outputs
            .first()
            .ok_or_else(|| ThreatError::Architecture("ONNX model defines no output".to_string()))?;

        let input_width = last_dimension(&input.input_type);
        let output_width = last_dimension(&output.output_type);
        let output_name = output.name.clone();

        log::info!(
            "ONNX model loaded successfully (output: {}, widths {:?} -> {:?})",
            output_name,
            input_width,
            output_width
        );

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            input_width,
            output_width,
        })
    }

    /// Declared tensor widths must match the feature count and class count.
    /// Dynamic dimensions are only checked at run time.
    pub fn ensure_io(&self, inputs: usize, classes: usize) -> ThreatResult<()> {
        check_width("input", self.input_width, inputs)?;
        check_width("output", self.output_width, classes)
    }
}

fn last_dimension(value_type: &ValueType) -> Option<usize> {
    match value_type {
        ValueType::Tensor { shape, .. } => shape
            .last()
            .copied()
            .filter(|&d| d > 0)
            .map(|d| d as usize),
        _ => None,
    }
}

fn check_width(role: &str, declared: Option<usize>, expected: usize) -> ThreatResult<()> {
    match declared {
        Some(width) if width != expected => Err(ThreatError::Architecture(format!(
            "ONNX {} width is {}, expected {}",
            role, width, expected
        ))),
        _ => Ok(()),
    }
}

impl Classifier for OnnxClassifier {
    fn logits(&self, batch: &Array2<f32>) -> ThreatResult<Vec<f32>> {
        let input_tensor = Value::from_array(batch.clone())
            .map_err(|e| ThreatError::Inference(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ThreatError::Inference(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| ThreatError::Inference("No output".to_string()))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| ThreatError::Inference(format!("Extract error: {}", e)))?;

        Ok(output_tensor.1.to_vec())
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Onnx
    }
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("output_name", &self.output_name)
            .field("input_width", &self.input_width)
            .field("output_width", &self.output_width)
            .finish_non_exhaustive()
    }
}
