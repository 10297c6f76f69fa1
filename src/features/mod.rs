//! Features Module - Traffic Feature Schema
//!
//! Fixed 45-feature layout and the validated vector built on it.

pub mod layout;
pub mod vector;

// Re-export common types
pub use layout::{
    feature_index, feature_name, layout_hash, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT,
    FEATURE_VERSION,
};
pub use vector::{FeatureVector, FeatureVectorBuilder};
