//! Error handling

use std::path::PathBuf;

use thiserror::Error;

pub type ThreatResult<T> = Result<T, ThreatError>;

#[derive(Debug, Error)]
pub enum ThreatError {
    // Feature vector errors
    #[error("feature length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("unknown feature: {0}")]
    UnknownFeature(String),

    #[error("feature {name} is not a finite number ({value})")]
    NonFiniteFeature { name: &'static str, value: f64 },

    // Artifact errors
    #[error("artifact not found: {}", .0.display())]
    ArtifactMissing(PathBuf),

    #[error("failed to read artifact {}: {source}", .path.display())]
    ArtifactIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed artifact {}: {reason}", .path.display())]
    ArtifactFormat { path: PathBuf, reason: String },

    #[error("model architecture mismatch: {0}")]
    Architecture(String),

    // Class catalog errors
    #[error("class catalog is empty")]
    EmptyCatalog,

    #[error("duplicate class label: {0}")]
    DuplicateClass(String),

    #[error("unknown class label: {0}")]
    UnknownClass(String),

    // Inference errors
    #[error("inference failed: {0}")]
    Inference(String),
}

impl ThreatError {
    /// True when the error only means an artifact file is absent
    pub fn is_missing_artifact(&self) -> bool {
        match self {
            ThreatError::ArtifactMissing(_) => true,
            ThreatError::ArtifactIo { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_message() {
        let err = ThreatError::LengthMismatch { expected: 45, actual: 44 };
        let message = err.to_string();
        assert!(message.contains("length mismatch"));
        assert!(message.contains("45"));
        assert!(message.contains("44"));
    }

    #[test]
    fn test_is_missing_artifact() {
        assert!(ThreatError::ArtifactMissing(PathBuf::from("scaler.json")).is_missing_artifact());

        let not_found = ThreatError::ArtifactIo {
            path: PathBuf::from("scaler.json"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(not_found.is_missing_artifact());

        let denied = ThreatError::ArtifactIo {
            path: PathBuf::from("scaler.json"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(!denied.is_missing_artifact());
        assert!(!ThreatError::EmptyCatalog.is_missing_artifact());
    }
}
