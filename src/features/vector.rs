//! Feature Vector - Core data structure for model input
//!
//! **Versioned feature vector with length and value validation**
//!
//! Every vector handed to the scaler, the network or the heuristic scorer
//! is a `FeatureVector`, so the 45-slot contract is checked once, here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::layout::{
    feature_index, layout_hash, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION,
};
use crate::error::{ThreatError, ThreatResult};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    #[serde(with = "values_serde")]
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Zeroed vector with current version
    pub fn new() -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values: [0.0; FEATURE_COUNT],
        }
    }

    /// Create from raw values in layout order
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> ThreatResult<Self> {
        check_finite(&values)?;
        Ok(Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        })
    }

    /// Create from a slice in layout order.
    ///
    /// A slice of any other length is a caller contract violation and is
    /// rejected; values are never truncated or padded.
    pub fn from_slice(values: &[f64]) -> ThreatResult<Self> {
        let array: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| {
            ThreatError::LengthMismatch {
                expected: FEATURE_COUNT,
                actual: values.len(),
            }
        })?;
        Self::from_values(array)
    }

    /// Create from a name → value table.
    ///
    /// Features absent from the table are 0.0. Names outside the layout
    /// are rejected so a typo cannot silently zero a feature.
    pub fn from_named<'a, I>(entries: I) -> ThreatResult<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut values = [0.0; FEATURE_COUNT];
        for (name, value) in entries {
            let index = feature_index(name)
                .ok_or_else(|| ThreatError::UnknownFeature(name.to_string()))?;
            values[index] = value;
        }
        Self::from_values(values)
    }

    /// Same as `from_named` for an owned map (e.g. parsed JSON)
    pub fn from_map(map: &HashMap<String, f64>) -> ThreatResult<Self> {
        Self::from_named(map.iter().map(|(k, v)| (k.as_str(), *v)))
    }

    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(name).and_then(|i| self.get(i))
    }

    /// Values as `f32`, the precision the network runs at
    pub fn to_f32(&self) -> [f32; FEATURE_COUNT] {
        self.values.map(|v| v as f32)
    }

    /// Name → value pairs in layout order
    pub fn named_values(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_LAYOUT.iter().copied().zip(self.values.iter().copied())
    }

    /// Convert to JSON for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "named_values": self.named_values()
                .map(|(name, value)| (name.to_string(), value))
                .collect::<HashMap<_, _>>(),
        })
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<f64>> for FeatureVector {
    type Error = ThreatError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_slice(&values)
    }
}

fn check_finite(values: &[f64; FEATURE_COUNT]) -> ThreatResult<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ThreatError::NonFiniteFeature {
            name: FEATURE_LAYOUT[index],
            value: values[index],
        }),
        None => Ok(()),
    }
}

/// serde has no impl for `[T; 45]`; go through a length-checked Vec.
mod values_serde {
    use super::FEATURE_COUNT;
    use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        values: &[f64; FEATURE_COUNT],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        values.as_slice().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<[f64; FEATURE_COUNT], D::Error> {
        let values = Vec::<f64>::deserialize(deserializer)?;
        let len = values.len();
        values.try_into().map_err(|_| {
            D::Error::custom(format!(
                "feature length mismatch: expected {}, got {}",
                FEATURE_COUNT, len
            ))
        })
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating FeatureVector with named setters
pub struct FeatureVectorBuilder {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self { values: [0.0; FEATURE_COUNT] }
    }

    pub fn duration(self, value: f64) -> Self {
        self.set_index(super::layout::DURATION, value)
    }

    pub fn rate(self, value: f64) -> Self {
        self.set_index(super::layout::RATE, value)
    }

    pub fn syn_count(self, value: f64) -> Self {
        self.set_index(super::layout::SYN_COUNT, value)
    }

    pub fn rst_count(self, value: f64) -> Self {
        self.set_index(super::layout::RST_COUNT, value)
    }

    /// Set feature by name; unknown names are reported at `build`
    pub fn set(mut self, name: &str, value: f64) -> ThreatResult<Self> {
        let index = feature_index(name)
            .ok_or_else(|| ThreatError::UnknownFeature(name.to_string()))?;
        self.values[index] = value;
        Ok(self)
    }

    fn set_index(mut self, index: usize, value: f64) -> Self {
        self.values[index] = value;
        self
    }

    pub fn build(self) -> ThreatResult<FeatureVector> {
        FeatureVector::from_values(self.values)
    }
}

impl Default for FeatureVectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_vector_new() {
        let vector = FeatureVector::new();
        assert_eq!(vector.version, FEATURE_VERSION);
        assert_eq!(vector.layout_hash, layout_hash());
        assert_eq!(vector.len(), FEATURE_COUNT);
        assert!(vector.as_slice().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_from_slice_rejects_short_vector() {
        let err = FeatureVector::from_slice(&[1.0; 44]).unwrap_err();
        assert!(err.to_string().contains("length mismatch"));
        assert!(matches!(err, ThreatError::LengthMismatch { expected: 45, actual: 44 }));
    }

    #[test]
    fn test_from_slice_rejects_long_vector() {
        let err = FeatureVector::from_slice(&[1.0; 46]).unwrap_err();
        assert!(matches!(err, ThreatError::LengthMismatch { expected: 45, actual: 46 }));
    }

    #[test]
    fn test_try_from_vec() {
        let vector = FeatureVector::try_from(vec![2.0; FEATURE_COUNT]).unwrap();
        assert_eq!(vector.get(44), Some(2.0));

        assert!(FeatureVector::try_from(Vec::new()).is_err());
    }

    #[test]
    fn test_from_slice_rejects_nan() {
        let mut values = [0.0; FEATURE_COUNT];
        values[3] = f64::NAN;
        let err = FeatureVector::from_slice(&values).unwrap_err();
        assert!(matches!(err, ThreatError::NonFiniteFeature { name: "Rate", .. }));
    }

    #[test]
    fn test_from_named_defaults_missing_to_zero() {
        let vector = FeatureVector::from_named([("Rate", 1000.0), ("syn_count", 3.0)]).unwrap();
        assert_eq!(vector.get_by_name("Rate"), Some(1000.0));
        assert_eq!(vector.get_by_name("syn_count"), Some(3.0));
        assert_eq!(vector.get_by_name("Duration"), Some(0.0));
    }

    #[test]
    fn test_from_named_rejects_unknown_feature() {
        let err = FeatureVector::from_named([("rate", 1.0)]).unwrap_err();
        assert!(matches!(err, ThreatError::UnknownFeature(ref name) if name == "rate"));
    }

    #[test]
    fn test_builder() {
        let vector = FeatureVectorBuilder::new()
            .rate(80000.0)
            .syn_count(1000.0)
            .duration(0.0005)
            .set("UDP", 1.0)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(vector.get_by_name("Rate"), Some(80000.0));
        assert_eq!(vector.get_by_name("syn_count"), Some(1000.0));
        assert_eq!(vector.get_by_name("Duration"), Some(0.0005));
        assert_eq!(vector.get_by_name("UDP"), Some(1.0));
        assert_eq!(vector.get_by_name("rst_count"), Some(0.0));
    }

    #[test]
    fn test_serde_keeps_length_contract() {
        let vector = FeatureVectorBuilder::new().rate(5.0).build().unwrap();
        let json = serde_json::to_string(&vector).unwrap();
        let back: FeatureVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vector);

        let short = r#"{"version":1,"layout_hash":0,"values":[1.0,2.0]}"#;
        assert!(serde_json::from_str::<FeatureVector>(short).is_err());
    }

    #[test]
    fn test_to_log_entry() {
        let vector = FeatureVectorBuilder::new().rate(50.0).build().unwrap();
        let log = vector.to_log_entry();
        assert_eq!(log["feature_version"], FEATURE_VERSION);
        assert_eq!(log["named_values"]["Rate"], 50.0);
    }
}
