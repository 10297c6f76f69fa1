//! Artifact Loader
//!
//! Loads scaler, label encoder and network from the model directory once per
//! process. Missing files switch the detector into heuristic mode; anything
//! else that goes wrong while loading is a hard error.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::catalog::ClassCatalog;
use super::inference::{Classifier, ModelKind};
use super::network::DenseNetwork;
use super::onnx::OnnxClassifier;
use super::scaler::StandardScaler;
use crate::config::DetectorConfig;
use crate::constants::DEMO_CLASSES;
use crate::error::{ThreatError, ThreatResult};
use crate::features::FEATURE_COUNT;

// ============================================================================
// MODE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorMode {
    /// Trained network with its fitted scaler
    Model,
    /// Heuristic scorer, no trained artifacts
    Fallback,
}

// ============================================================================
// MANIFEST
// ============================================================================

/// One artifact file that was read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactFile {
    pub path: PathBuf,
    /// Hex SHA-256 of the file contents
    pub sha256: String,
}

/// What was loaded, for logs and status output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub mode: DetectorMode,
    pub model_kind: Option<ModelKind>,
    pub parameter_count: Option<usize>,
    pub class_count: usize,
    pub files: Vec<ArtifactFile>,
    pub loaded_at: DateTime<Utc>,
}

// ============================================================================
// LOADED ARTIFACTS
// ============================================================================

/// Trained classifier + fitted scaler + class catalog
pub struct ModelArtifacts {
    pub classifier: Box<dyn Classifier>,
    pub scaler: StandardScaler,
    pub catalog: ClassCatalog,
}

impl std::fmt::Debug for ModelArtifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelArtifacts")
            .field("kind", &self.classifier.kind())
            .field("scaler", &self.scaler)
            .field("catalog", &self.catalog)
            .finish()
    }
}

/// Result of loading: decides which prediction path runs
#[derive(Debug)]
pub enum LoadedArtifacts {
    Model(ModelArtifacts),
    Fallback { catalog: ClassCatalog },
}

impl LoadedArtifacts {
    pub fn mode(&self) -> DetectorMode {
        match self {
            LoadedArtifacts::Model(_) => DetectorMode::Model,
            LoadedArtifacts::Fallback { .. } => DetectorMode::Fallback,
        }
    }

    pub fn uses_real_model(&self) -> bool {
        self.mode() == DetectorMode::Model
    }

    pub fn catalog(&self) -> &ClassCatalog {
        match self {
            LoadedArtifacts::Model(model) => &model.catalog,
            LoadedArtifacts::Fallback { catalog } => catalog,
        }
    }

    pub fn model_kind(&self) -> Option<ModelKind> {
        match self {
            LoadedArtifacts::Model(model) => Some(model.classifier.kind()),
            LoadedArtifacts::Fallback { .. } => None,
        }
    }

    pub fn parameter_count(&self) -> Option<usize> {
        match self {
            LoadedArtifacts::Model(model) => model.classifier.parameter_count(),
            LoadedArtifacts::Fallback { .. } => None,
        }
    }

    /// Heuristic mode over the demo classes
    pub fn demo() -> Self {
        LoadedArtifacts::Fallback { catalog: demo_catalog() }
    }
}

pub fn demo_catalog() -> ClassCatalog {
    // DEMO_CLASSES is a fixed, non-empty, duplicate-free list
    ClassCatalog::new(DEMO_CLASSES.iter().copied())
        .unwrap_or_else(|e| unreachable!("demo catalog is valid: {}", e))
}

// ============================================================================
// LOADER
// ============================================================================

/// Load artifacts, falling back to heuristic mode when files are missing
pub fn load(config: &DetectorConfig) -> ThreatResult<(LoadedArtifacts, ArtifactManifest)> {
    if config.force_fallback {
        log::info!("Heuristic mode forced by configuration");
        return fallback(config);
    }

    match load_model(config) {
        Ok((model, files)) => {
            let manifest = ArtifactManifest {
                mode: DetectorMode::Model,
                model_kind: Some(model.classifier.kind()),
                parameter_count: model.classifier.parameter_count(),
                class_count: model.catalog.len(),
                files,
                loaded_at: Utc::now(),
            };
            log::info!(
                "Real model loaded ({}, {} classes) from {}",
                model.classifier.kind().as_str(),
                model.catalog.len(),
                config.model_dir.display()
            );
            Ok((LoadedArtifacts::Model(model), manifest))
        }
        Err(e) if e.is_missing_artifact() => {
            log::warn!("Model files not found: {}. Using heuristic predictions.", e);
            fallback(config)
        }
        Err(e) => Err(e),
    }
}

fn load_model(config: &DetectorConfig) -> ThreatResult<(ModelArtifacts, Vec<ArtifactFile>)> {
    let scaler_path = config.scaler_path();
    let encoder_path = config.label_encoder_path();

    let scaler = StandardScaler::from_file(&scaler_path)?;
    let catalog = ClassCatalog::from_file(&encoder_path)?;

    let onnx_path = config.onnx_model_path();
    let weights_path = config.weights_path();

    let (classifier, model_path): (Box<dyn Classifier>, PathBuf) = if onnx_path.exists() {
        let onnx = OnnxClassifier::from_file(&onnx_path)?;
        onnx.ensure_io(FEATURE_COUNT, catalog.len())?;
        (Box::new(onnx), onnx_path)
    } else if weights_path.exists() {
        let network = DenseNetwork::from_file(&weights_path)?;
        network.ensure_architecture(FEATURE_COUNT, catalog.len())?;
        (Box::new(network), weights_path)
    } else {
        return Err(ThreatError::ArtifactMissing(weights_path));
    };

    let files = vec![
        fingerprint(&scaler_path)?,
        fingerprint(&encoder_path)?,
        fingerprint(&model_path)?,
    ];

    Ok((ModelArtifacts { classifier, scaler, catalog }, files))
}

/// Heuristic mode. A label encoder export on its own still names the classes.
fn fallback(config: &DetectorConfig) -> ThreatResult<(LoadedArtifacts, ArtifactManifest)> {
    let mut files = Vec::new();
    let encoder_path = config.label_encoder_path();
    let catalog = match ClassCatalog::from_file(&encoder_path) {
        Ok(catalog) => {
            files.push(fingerprint(&encoder_path)?);
            catalog
        }
        Err(e) if e.is_missing_artifact() => {
            log::info!("No label encoder export, using demo classes");
            demo_catalog()
        }
        Err(e) => return Err(e),
    };

    let manifest = ArtifactManifest {
        mode: DetectorMode::Fallback,
        model_kind: None,
        parameter_count: None,
        class_count: catalog.len(),
        files,
        loaded_at: Utc::now(),
    };

    Ok((LoadedArtifacts::Fallback { catalog }, manifest))
}

fn fingerprint(path: &Path) -> ThreatResult<ArtifactFile> {
    let bytes = std::fs::read(path).map_err(|source| ThreatError::ArtifactIo {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);

    Ok(ArtifactFile {
        path: path.to_path_buf(),
        sha256: hex::encode(hasher.finalize()),
    })
}

// ============================================================================
// CACHE-ONCE HANDLE
// ============================================================================

/// Loads on first use, then hands out the same immutable artifacts
#[derive(Debug, Default)]
pub struct ArtifactCache {
    cell: OnceCell<(Arc<LoadedArtifacts>, ArtifactManifest)>,
}

impl ArtifactCache {
    pub fn new() -> Self {
        Self { cell: OnceCell::new() }
    }

    pub fn get_or_load(&self, config: &DetectorConfig) -> ThreatResult<Arc<LoadedArtifacts>> {
        self.cell
            .get_or_try_init(|| {
                load(config).map(|(artifacts, manifest)| (Arc::new(artifacts), manifest))
            })
            .map(|(artifacts, _)| Arc::clone(artifacts))
    }

    pub fn manifest(&self) -> Option<&ArtifactManifest> {
        self.cell.get().map(|(_, manifest)| manifest)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}
