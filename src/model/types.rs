//! Prediction Types
//!
//! Data structures shared by both prediction paths.
//! No scoring logic lives here.

use serde::{Deserialize, Serialize};

use super::catalog::ClassCatalog;

// ============================================================================
// PREDICTION METHOD
// ============================================================================

/// Which path produced a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMethod {
    /// Trained network over scaled features
    Model,
    /// Heuristic scorer over raw features
    Heuristic,
}

impl PredictionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionMethod::Model => "model",
            PredictionMethod::Heuristic => "heuristic",
        }
    }
}

impl std::fmt::Display for PredictionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PROBABILITY DISTRIBUTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProbability {
    pub label: String,
    pub probability: f64,
}

/// One entry per catalog class, in catalog order, summing to 1.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbabilityDistribution {
    entries: Vec<ClassProbability>,
}

impl ProbabilityDistribution {
    /// Pair normalized probabilities with catalog labels.
    /// Callers guarantee `probabilities.len() == catalog.len()`.
    pub(crate) fn from_catalog(catalog: &ClassCatalog, probabilities: Vec<f64>) -> Self {
        debug_assert_eq!(catalog.len(), probabilities.len());
        let entries = catalog
            .iter()
            .zip(probabilities)
            .map(|(label, probability)| ClassProbability {
                label: label.to_string(),
                probability,
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.probability)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|e| (e.label.as_str(), e.probability))
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.probability).collect()
    }

    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|e| e.probability).sum()
    }

    /// Index of the largest probability; the first one wins ties
    pub fn argmax(&self) -> Option<usize> {
        argmax(&self.probabilities())
    }
}

/// Index of the maximum value, first occurrence on ties
pub fn argmax<T: PartialOrd + Copy>(values: &[T]) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;
    for (i, &value) in values.iter().enumerate() {
        match best {
            Some((_, current)) if !(value > current) => {}
            _ => best = Some((i, value)),
        }
    }
    best.map(|(i, _)| i)
}

// ============================================================================
// PREDICTION RESULT
// ============================================================================

/// Prediction output, built once per call and never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub class_index: usize,
    /// Probability of `label`, in [0, 1]
    pub confidence: f64,
    pub probabilities: ProbabilityDistribution,
    pub method: PredictionMethod,
    pub inference_time_us: u64,
}

impl Prediction {
    /// Build from a normalized distribution; `None` if it is empty
    pub(crate) fn from_distribution(
        probabilities: ProbabilityDistribution,
        method: PredictionMethod,
        inference_time_us: u64,
    ) -> Option<Self> {
        let class_index = probabilities.argmax()?;
        let entry = &probabilities.entries[class_index];
        Some(Self {
            label: entry.label.clone(),
            class_index,
            confidence: entry.probability,
            probabilities,
            method,
            inference_time_us,
        })
    }
}
