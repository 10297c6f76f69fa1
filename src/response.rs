//! Response Recommendations
//!
//! Maps a predicted class to a threat level, confidence band and the
//! recommended operator actions shown next to a result.

use serde::{Deserialize, Serialize};

use crate::model::Prediction;

// ============================================================================
// THREAT LEVEL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatLevel {
    /// Normal traffic, keep monitoring
    Benign,
    /// Any attack class, action recommended
    Threat,
}

impl ThreatLevel {
    /// Only labels equal to "benign" or "normal" (any case) are benign
    pub fn of(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "benign" | "normal" => ThreatLevel::Benign,
            _ => ThreatLevel::Threat,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Benign => "benign",
            ThreatLevel::Threat => "threat",
        }
    }
}

// ============================================================================
// CONFIDENCE BAND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    /// Below 50%
    Low,
    /// 50% up to 80%
    Medium,
    /// 80% and above
    High,
}

impl ConfidenceBand {
    pub fn of(confidence: f64) -> Self {
        if confidence < 0.5 {
            ConfidenceBand::Low
        } else if confidence < 0.8 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::High
        }
    }
}

// ============================================================================
// RECOMMENDATIONS
// ============================================================================

const BENIGN_ACTIONS: &[&str] = &[
    "Traffic appears normal - continue monitoring",
    "Regular security audits recommended",
    "Keep security systems updated",
];

const DDOS_ACTIONS: &[&str] = &[
    "CRITICAL: Block source IP immediately",
    "Activate DDoS protection mechanisms",
    "Scale infrastructure to handle load",
    "Notify security team immediately",
    "Document incident for analysis",
];

const SCAN_ACTIONS: &[&str] = &[
    "Block scanning source IP",
    "Review and strengthen firewall rules",
    "Check for system vulnerabilities",
    "Monitor for exploitation attempts",
    "Log incident for threat intelligence",
];

const GENERIC_ACTIONS: &[&str] = &[
    "WARNING: Potential security threat detected",
    "Investigate traffic source immediately",
    "Implement additional security measures",
    "Contact security team",
    "Perform detailed traffic analysis",
];

/// Recommended actions for a predicted class label
pub fn recommendations(label: &str) -> &'static [&'static str] {
    let lower = label.to_lowercase();
    if ThreatLevel::of(label) == ThreatLevel::Benign {
        BENIGN_ACTIONS
    } else if lower.contains("ddos") {
        DDOS_ACTIONS
    } else if lower.contains("port") || lower.contains("scan") {
        SCAN_ACTIONS
    } else {
        GENERIC_ACTIONS
    }
}

// ============================================================================
// ASSESSMENT
// ============================================================================

/// Prediction plus what to do about it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub prediction: Prediction,
    pub level: ThreatLevel,
    pub confidence_band: ConfidenceBand,
    pub recommendations: Vec<String>,
}

impl Assessment {
    pub fn new(prediction: Prediction) -> Self {
        let level = ThreatLevel::of(&prediction.label);
        let confidence_band = ConfidenceBand::of(prediction.confidence);
        let recommendations = recommendations(&prediction.label)
            .iter()
            .map(|s| s.to_string())
            .collect();

        Self { prediction, level, confidence_band, recommendations }
    }
}
