//! Heuristic Fallback Scorer
//!
//! Used when no trained artifacts are available. Produces a full,
//! differentiated distribution over whatever classes the catalog declares,
//! straight from raw (unscaled) features.
//!
//! Pure function of (features, catalog): no state, no randomness.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::catalog::ClassCatalog;
use super::types::{Prediction, PredictionMethod, ProbabilityDistribution};
use crate::error::{ThreatError, ThreatResult};
use crate::features::{layout, FeatureVector};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Packets/s that alone saturate the flood score
pub const DDOS_RATE_SCALE: f64 = 50_000.0;
pub const DDOS_SYN_SCALE: f64 = 2_000.0;

pub const SCAN_SYN_SCALE: f64 = 500.0;
pub const SCAN_RST_SCALE: f64 = 300.0;

/// Seconds of connection time that alone saturate the slow-persistent score
pub const MALWARE_DURATION_SCALE: f64 = 60.0;
/// Rates below this add to the slow-persistent score
pub const MALWARE_RATE_CEILING: f64 = 500.0;
pub const MALWARE_RATE_SCALE: f64 = 10_000.0;

pub const BENIGN_DDOS_WEIGHT: f64 = 0.6;
pub const BENIGN_SCAN_WEIGHT: f64 = 0.5;
pub const BENIGN_MALWARE_WEIGHT: f64 = 0.5;

/// Additive bias per family; separates the primary family from close competitors
pub const DDOS_BIAS: f64 = 0.05;
pub const SCAN_BIAS: f64 = 0.03;
pub const MALWARE_BIAS: f64 = 0.02;
pub const BENIGN_BIAS: f64 = 0.6;

/// Raw score for labels no family recognizes
pub const UNKNOWN_CLASS_SCORE: f64 = 0.01;

// ============================================================================
// SUSPICION SCORES
// ============================================================================

/// Per-family scores, each clamped to [0, 1] whatever the raw inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuspicionScores {
    pub ddos: f64,
    pub port_scan: f64,
    pub malware: f64,
    pub benign: f64,
}

impl SuspicionScores {
    pub fn from_features(features: &FeatureVector) -> Self {
        let values = features.as_array();
        let rate = values[layout::RATE];
        let syn = values[layout::SYN_COUNT];
        let rst = values[layout::RST_COUNT];
        let duration = values[layout::DURATION];

        // Negative counters are accepted upstream; they must not push a
        // score below zero or benign above one.
        let ddos = (rate / DDOS_RATE_SCALE + syn / DDOS_SYN_SCALE).clamp(0.0, 1.0);
        let port_scan = (syn / SCAN_SYN_SCALE + rst / SCAN_RST_SCALE).clamp(0.0, 1.0);
        let malware = (duration / MALWARE_DURATION_SCALE
            + ((MALWARE_RATE_CEILING - rate) / MALWARE_RATE_SCALE).max(0.0))
        .clamp(0.0, 1.0);

        let benign = (1.0
            - BENIGN_DDOS_WEIGHT * ddos
            - BENIGN_SCAN_WEIGHT * port_scan
            - BENIGN_MALWARE_WEIGHT * malware)
            .max(0.0);

        Self { ddos, port_scan, malware, benign }
    }

    /// Raw (unnormalized) score for one class label
    pub fn raw_score(&self, label: &str) -> f64 {
        match ThreatFamily::of(label) {
            Some(ThreatFamily::Ddos) => self.ddos + DDOS_BIAS,
            Some(ThreatFamily::Scan) => self.port_scan + SCAN_BIAS,
            Some(ThreatFamily::Malware) => self.malware + MALWARE_BIAS,
            Some(ThreatFamily::Benign) => self.benign + BENIGN_BIAS,
            None => UNKNOWN_CLASS_SCORE,
        }
    }
}

// ============================================================================
// LABEL MATCHING
// ============================================================================

/// Family a class label belongs to, by case-insensitive substring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatFamily {
    Ddos,
    Scan,
    Malware,
    Benign,
}

impl ThreatFamily {
    /// First match wins, in this order: ddos, port/scan/recon, malware, benign/normal
    pub fn of(label: &str) -> Option<Self> {
        let label = label.to_lowercase();
        if label.contains("ddos") {
            Some(ThreatFamily::Ddos)
        } else if ["port", "scan", "recon"].iter().any(|k| label.contains(k)) {
            Some(ThreatFamily::Scan)
        } else if label.contains("malware") {
            Some(ThreatFamily::Malware)
        } else if label.contains("benign") || label.contains("normal") {
            Some(ThreatFamily::Benign)
        } else {
            None
        }
    }
}

// ============================================================================
// SCORER
// ============================================================================

/// Divide by the sum; an exactly-zero sum becomes uniform
pub fn normalize(raw: &[f64]) -> Vec<f64> {
    let total: f64 = raw.iter().sum();
    if total == 0.0 {
        let uniform = 1.0 / raw.len() as f64;
        return vec![uniform; raw.len()];
    }
    raw.iter().map(|r| r / total).collect()
}

/// Probability distribution over every catalog class
pub fn score(features: &FeatureVector, catalog: &ClassCatalog) -> ProbabilityDistribution {
    let scores = SuspicionScores::from_features(features);
    let raw: Vec<f64> = catalog.iter().map(|label| scores.raw_score(label)).collect();
    ProbabilityDistribution::from_catalog(catalog, normalize(&raw))
}

/// Heuristic prediction over the catalog classes
pub fn predict(features: &FeatureVector, catalog: &ClassCatalog) -> ThreatResult<Prediction> {
    let start_time = Instant::now();
    let probabilities = score(features, catalog);
    let inference_time = start_time.elapsed().as_micros() as u64;

    Prediction::from_distribution(probabilities, PredictionMethod::Heuristic, inference_time)
        .ok_or(ThreatError::EmptyCatalog)
}
