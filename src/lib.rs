//! SecureGluco Threat Classifier
//!
//! Classifies one network flow, described by 45 traffic features, into a
//! threat category with a confidence and full probability map.
//!
//! ```text
//! features ──► FeatureVector ──┬─► StandardScaler ─► Classifier ─► softmax ──┐
//!                              │      (real model: dense weights or ONNX)     ├─► Prediction
//!                              └─► heuristic scorer (no model artifacts) ─────┘
//! ```
//!
//! Artifacts load once (`Detector::init` / `ArtifactCache`) and are shared
//! read-only afterwards. Missing artifact files never fail: the detector
//! switches to the heuristic scorer.

pub mod config;
pub mod constants;
pub mod error;
pub mod features;
pub mod model;
pub mod response;
pub mod samples;

pub use config::DetectorConfig;
pub use error::{ThreatError, ThreatResult};
pub use features::{FeatureVector, FeatureVectorBuilder, FEATURE_COUNT, FEATURE_LAYOUT};
pub use model::{predict, Detector, DetectorMode, LoadedArtifacts, Prediction};
pub use response::Assessment;
