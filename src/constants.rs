//! Central Configuration Constants
//!
//! Single source of truth for artifact file names and runtime defaults.
//! Environment overrides are resolved in `config.rs`.

/// Default directory searched for model artifacts
pub const DEFAULT_MODEL_DIR: &str = ".";

/// Fitted StandardScaler export (`mean_` / `scale_`)
pub const DEFAULT_SCALER_FILE: &str = "scaler.json";

/// Fitted LabelEncoder export (`classes_`)
pub const DEFAULT_LABEL_ENCODER_FILE: &str = "label_encoder.json";

/// ONNX export of the trained network
pub const DEFAULT_ONNX_MODEL_FILE: &str = "best_model.onnx";

/// Dense weight export of the trained network (state_dict layout)
pub const DEFAULT_WEIGHTS_FILE: &str = "best_model.json";

/// Hidden layer widths of the LightweightANN (45 -> 256 -> 128 -> 64 -> N)
pub const HIDDEN_LAYERS: [usize; 3] = [256, 128, 64];

/// Labels used when no label encoder export is available.
/// Sorted the way a fitted label encoder orders its classes.
///
/// Port_Scan and Recon share the scan score, so with these classes a SYN
/// flood still ranks DDoS first but at roughly 0.28 confidence. Ship a
/// `label_encoder.json` to score against the real class set.
pub const DEMO_CLASSES: &[&str] = &[
    "Benign",
    "DDoS",
    "MQTT",
    "Malware",
    "Port_Scan",
    "Recon",
    "Spoofing",
];

/// Default log filter for the binaries
pub const DEFAULT_LOG_FILTER: &str = "info";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "SecureGluco Threat Classifier";
