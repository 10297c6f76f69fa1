//! Class Catalog - typed label encoder
//!
//! Ordered, unique class labels with a label ↔ index bijection.
//! Index `i` is the network's output position `i`.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ThreatError, ThreatResult};

/// On-disk shape of an exported label encoder
#[derive(Debug, Deserialize)]
struct LabelEncoderExport {
    classes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassCatalog {
    labels: Vec<String>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl ClassCatalog {
    /// Build from labels in output order. Rejects empty and duplicate lists.
    pub fn new<I, S>(labels: I) -> ThreatResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(ThreatError::EmptyCatalog);
        }

        let mut index = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), i).is_some() {
                return Err(ThreatError::DuplicateClass(label.clone()));
            }
        }

        Ok(Self { labels, index })
    }

    /// Load `{"classes": [...]}` exported from a fitted label encoder
    pub fn from_file(path: &Path) -> ThreatResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ThreatError::ArtifactIo {
            path: path.to_path_buf(),
            source,
        })?;

        let export: LabelEncoderExport =
            serde_json::from_str(&content).map_err(|e| ThreatError::ArtifactFormat {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Self::new(export.classes).map_err(|e| ThreatError::ArtifactFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label for an output index (inverse transform)
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Output index for a label (forward transform)
    pub fn index_of(&self, label: &str) -> ThreatResult<usize> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| ThreatError::UnknownClass(label.to_string()))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}
