//! Integration Tests for the prediction paths
//!
//! Exercise loader → orchestrator → scorer/network together, with artifacts
//! written to temp directories.

#[cfg(test)]
mod integration_tests {
    use std::path::Path;
    use std::sync::Arc;

    use ndarray::{Array1, Array2};
    use tempfile::tempdir;

    use crate::config::DetectorConfig;
    use crate::constants::{DEMO_CLASSES, HIDDEN_LAYERS};
    use crate::error::{ThreatError, ThreatResult};
    use crate::features::{FeatureVector, FeatureVectorBuilder, FEATURE_COUNT};
    use crate::model::{
        artifacts, fallback, predict, predict_or_fallback, softmax, types::argmax, ArtifactCache,
        ClassCatalog, Classifier, DenseLayer, DenseNetwork, Detector, DetectorMode,
        LoadedArtifacts, ModelArtifacts, ModelKind, PredictionMethod, StandardScaler,
        SuspicionScores,
    };
    use crate::samples;

    // ------------------------------------------------------------------------
    // Fixtures
    // ------------------------------------------------------------------------

    fn weight(layer: usize, out: usize, input: usize) -> f32 {
        (((out * 7 + input * 13 + layer * 3) % 17) as f32 - 8.0) * 0.01
    }

    fn bias(layer: usize, out: usize) -> f32 {
        (((out + layer) % 5) as f32 - 2.0) * 0.1
    }

    fn widths(classes: usize) -> Vec<usize> {
        std::iter::once(FEATURE_COUNT)
            .chain(HIDDEN_LAYERS)
            .chain(std::iter::once(classes))
            .collect()
    }

    /// Full-size LightweightANN with fixed weights
    fn lightweight_network(classes: usize) -> DenseNetwork {
        let layers = widths(classes)
            .windows(2)
            .enumerate()
            .map(|(l, pair)| {
                let w = Array2::from_shape_fn((pair[1], pair[0]), |(o, i)| weight(l, o, i));
                let b = Array1::from_shape_fn(pair[1], |o| bias(l, o));
                DenseLayer::new(w, b).unwrap()
            })
            .collect();
        DenseNetwork::new(layers).unwrap()
    }

    fn fixed_scaler() -> StandardScaler {
        StandardScaler::new(
            (0..FEATURE_COUNT).map(|i| i as f64).collect(),
            (0..FEATURE_COUNT).map(|i| 10.0 + i as f64 * 100.0).collect(),
        )
        .unwrap()
    }

    fn write_json(path: &Path, value: serde_json::Value) {
        std::fs::write(path, value.to_string()).unwrap();
    }

    fn write_label_encoder(dir: &Path, classes: &[&str]) {
        write_json(&dir.join("label_encoder.json"), serde_json::json!({ "classes": classes }));
    }

    fn write_scaler(dir: &Path) {
        let scaler = fixed_scaler();
        write_json(
            &dir.join("scaler.json"),
            serde_json::json!({ "mean": scaler.mean(), "scale": scaler.scale() }),
        );
    }

    fn write_weights(dir: &Path, classes: usize) {
        let layers: Vec<serde_json::Value> = widths(classes)
            .windows(2)
            .enumerate()
            .map(|(l, pair)| {
                let w: Vec<Vec<f32>> = (0..pair[1])
                    .map(|o| (0..pair[0]).map(|i| weight(l, o, i)).collect())
                    .collect();
                let b: Vec<f32> = (0..pair[1]).map(|o| bias(l, o)).collect();
                serde_json::json!({ "weight": w, "bias": b })
            })
            .collect();
        write_json(&dir.join("best_model.json"), serde_json::json!({ "layers": layers }));
    }

    fn write_model_dir(dir: &Path, classes: &[&str]) {
        write_scaler(dir);
        write_label_encoder(dir, classes);
        write_weights(dir, classes.len());
    }

    fn sample(name: &str) -> FeatureVector {
        samples::find(name).unwrap().to_vector().unwrap()
    }

    struct Broken;

    impl Classifier for Broken {
        fn logits(&self, _batch: &Array2<f32>) -> ThreatResult<Vec<f32>> {
            Err(ThreatError::Inference("session crashed".to_string()))
        }

        fn kind(&self) -> ModelKind {
            ModelKind::Onnx
        }
    }

    // ------------------------------------------------------------------------
    // Heuristic scorer properties
    // ------------------------------------------------------------------------

    #[test]
    fn test_fallback_distribution_is_complete_and_normalized() {
        let catalogs = [
            artifacts::demo_catalog(),
            ClassCatalog::new(["Benign", "DDoS", "Port_Scan", "Malware"]).unwrap(),
            ClassCatalog::new(["normal", "ARP_Spoofing", "MQTT_Flood", "Recon_OS_Scan"]).unwrap(),
            ClassCatalog::new(["Unknown"]).unwrap(),
        ];

        for catalog in &catalogs {
            for s in samples::SAMPLES {
                let dist = fallback::score(&s.to_vector().unwrap(), catalog);

                assert_eq!(dist.len(), catalog.len());
                for (label, expected) in dist.iter().map(|(l, _)| l).zip(catalog.iter()) {
                    assert_eq!(label, expected);
                }
                assert!(dist.iter().all(|(_, p)| p >= 0.0));
                assert!((dist.sum() - 1.0).abs() < 1e-9, "sample {}", s.name);
            }
        }
    }

    #[test]
    fn test_rate_never_lowers_ddos_score() {
        let mut previous = f64::NEG_INFINITY;
        for step in 0..200 {
            let rate = step as f64 * 500.0;
            let features = FeatureVectorBuilder::new().rate(rate).syn_count(40.0).build().unwrap();
            let scores = SuspicionScores::from_features(&features);

            assert!(scores.ddos >= previous);
            assert!(scores.ddos <= 1.0);
            assert!(scores.raw_score("DDoS") >= previous + fallback::DDOS_BIAS - 1e-15);
            previous = scores.ddos;
        }
        assert_eq!(previous, 1.0);
    }

    #[test]
    fn test_duration_never_lowers_malware_score() {
        let mut previous = f64::NEG_INFINITY;
        for step in 0..200 {
            let duration = step as f64 * 0.5;
            let features = FeatureVectorBuilder::new()
                .rate(300.0)
                .duration(duration)
                .build()
                .unwrap();
            let scores = SuspicionScores::from_features(&features);

            assert!(scores.malware >= previous);
            assert!(scores.malware <= 1.0);
            previous = scores.malware;
        }
        assert_eq!(previous, 1.0);
    }

    #[test]
    fn test_zero_vector_with_unrecognized_labels_is_uniform() {
        let catalog = ClassCatalog::new(["Spoofing", "MQTT", "Brute_Force"]).unwrap();
        let dist = fallback::score(&FeatureVector::new(), &catalog);

        let probs = dist.probabilities();
        assert!(probs.iter().all(|p| (p - 1.0 / 3.0).abs() < 1e-12));
        assert_eq!(probs[0], probs[1]);
        assert_eq!(probs[1], probs[2]);
    }

    #[test]
    fn test_negative_features_keep_distribution_valid() {
        let features = FeatureVectorBuilder::new()
            .rate(-100_000.0)
            .syn_count(-2_000.0)
            .rst_count(-300.0)
            .duration(-60.0)
            .build()
            .unwrap();

        let prediction = predict(&features, &LoadedArtifacts::demo()).unwrap();
        assert!(prediction.probabilities.iter().all(|(_, p)| (0.0..=1.0).contains(&p)));
        assert!((prediction.probabilities.sum() - 1.0).abs() < 1e-9);
        assert!((0.0..=1.0).contains(&prediction.confidence));
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let catalog = artifacts::demo_catalog();
        for s in samples::SAMPLES {
            let features = s.to_vector().unwrap();
            let a = fallback::score(&features, &catalog).probabilities();
            let b = fallback::score(&features, &catalog).probabilities();

            let bits_a: Vec<u64> = a.iter().map(|p| p.to_bits()).collect();
            let bits_b: Vec<u64> = b.iter().map(|p| p.to_bits()).collect();
            assert_eq!(bits_a, bits_b);
        }
    }

    #[test]
    fn test_wrong_length_fails_before_scoring() {
        for len in [0, 44, 46] {
            let err = FeatureVector::from_slice(&vec![1.0; len]).unwrap_err();
            assert!(err.to_string().contains("length mismatch"));
        }
    }

    #[test]
    fn test_ddos_sample_scenario() {
        let catalog = ClassCatalog::new(["Benign", "DDoS", "Malware", "Spoofing"]).unwrap();
        let artifacts = LoadedArtifacts::Fallback { catalog };

        let prediction = predict(&sample("DDoS"), &artifacts).unwrap();
        assert_eq!(prediction.label, "DDoS");
        assert!(prediction.confidence > 0.5);
        assert_eq!(prediction.method, PredictionMethod::Heuristic);

        // The saturated scan score keeps DDoS ahead even with scan classes present
        let demo = predict(&sample("DDoS"), &LoadedArtifacts::demo()).unwrap();
        assert_eq!(demo.label, "DDoS");
        assert!(demo.confidence > 0.25 && demo.confidence < 0.3);
    }

    #[test]
    fn test_benign_sample_scenario() {
        let prediction = predict(&sample("Benign"), &LoadedArtifacts::demo()).unwrap();
        assert_eq!(prediction.label, "Benign");
        assert_eq!(prediction.confidence, prediction.probabilities.get("Benign").unwrap());
    }

    #[test]
    fn test_port_scan_sample_scenario() {
        let prediction = predict(&sample("Port_Scan"), &LoadedArtifacts::demo()).unwrap();
        assert_eq!(prediction.label, "Port_Scan");
    }

    // ------------------------------------------------------------------------
    // Real model path
    // ------------------------------------------------------------------------

    #[test]
    fn test_real_model_softmax_and_argmax() {
        let classes = ["Benign", "DDoS", "Malware", "Port_Scan"];
        let artifacts = LoadedArtifacts::Model(ModelArtifacts {
            classifier: Box::new(lightweight_network(classes.len())),
            scaler: fixed_scaler(),
            catalog: ClassCatalog::new(classes).unwrap(),
        });

        let LoadedArtifacts::Model(model) = &artifacts else {
            unreachable!()
        };

        for s in samples::SAMPLES {
            let features = s.to_vector().unwrap();
            let prediction = predict(&features, &artifacts).unwrap();

            let logits = model.classifier.logits(&model.scaler.transform(&features)).unwrap();
            assert_eq!(Some(prediction.class_index), argmax(&logits));
            assert_eq!(prediction.label, classes[prediction.class_index]);
            assert_eq!(prediction.method, PredictionMethod::Model);
            assert!((prediction.probabilities.sum() - 1.0).abs() < 1e-9);
            assert_eq!(prediction.probabilities.probabilities(), softmax(&logits));
        }
    }

    #[test]
    fn test_real_model_is_deterministic() {
        let artifacts = LoadedArtifacts::Model(ModelArtifacts {
            classifier: Box::new(lightweight_network(3)),
            scaler: fixed_scaler(),
            catalog: ClassCatalog::new(["A", "B", "C"]).unwrap(),
        });

        let features = sample("Recon");
        let a = predict(&features, &artifacts).unwrap();
        let b = predict(&features, &artifacts).unwrap();
        assert_eq!(a.probabilities, b.probabilities);
    }

    #[test]
    fn test_predict_or_fallback_recovers_from_model_failure() {
        let artifacts = LoadedArtifacts::Model(ModelArtifacts {
            classifier: Box::new(Broken),
            scaler: StandardScaler::identity(),
            catalog: ClassCatalog::new(["Benign", "DDoS"]).unwrap(),
        });

        assert!(predict(&sample("DDoS"), &artifacts).is_err());

        let prediction = predict_or_fallback(&sample("DDoS"), &artifacts).unwrap();
        assert_eq!(prediction.method, PredictionMethod::Heuristic);
        assert_eq!(prediction.label, "DDoS");
    }

    // ------------------------------------------------------------------------
    // Artifact loader
    // ------------------------------------------------------------------------

    #[test]
    fn test_empty_dir_falls_back_to_demo_classes() {
        let dir = tempdir().unwrap();
        let (loaded, manifest) = artifacts::load(&DetectorConfig::with_model_dir(dir.path())).unwrap();

        assert_eq!(loaded.mode(), DetectorMode::Fallback);
        assert!(!loaded.uses_real_model());
        assert_eq!(loaded.catalog().len(), DEMO_CLASSES.len());
        assert!(manifest.files.is_empty());
        assert_eq!(manifest.model_kind, None);
    }

    #[test]
    fn test_label_encoder_alone_names_fallback_classes() {
        let dir = tempdir().unwrap();
        write_label_encoder(dir.path(), &["Benign", "DDoS", "Recon"]);

        let (loaded, manifest) = artifacts::load(&DetectorConfig::with_model_dir(dir.path())).unwrap();
        assert_eq!(loaded.mode(), DetectorMode::Fallback);
        assert_eq!(loaded.catalog().labels(), &["Benign", "DDoS", "Recon"]);
        assert_eq!(manifest.files.len(), 1);
    }

    #[test]
    fn test_missing_weights_falls_back() {
        let dir = tempdir().unwrap();
        write_scaler(dir.path());
        write_label_encoder(dir.path(), &["Benign", "DDoS"]);

        let (loaded, _) = artifacts::load(&DetectorConfig::with_model_dir(dir.path())).unwrap();
        assert_eq!(loaded.mode(), DetectorMode::Fallback);
        assert_eq!(loaded.catalog().len(), 2);
    }

    #[test]
    fn test_full_model_dir_loads_real_model() {
        let dir = tempdir().unwrap();
        let classes = ["Benign", "DDoS", "Port_Scan"];
        write_model_dir(dir.path(), &classes);

        let (loaded, manifest) = artifacts::load(&DetectorConfig::with_model_dir(dir.path())).unwrap();

        assert_eq!(loaded.mode(), DetectorMode::Model);
        assert_eq!(loaded.model_kind(), Some(ModelKind::Dense));
        let expected_params = 45 * 256 + 256 + 256 * 128 + 128 + 128 * 64 + 64 + 64 * 3 + 3;
        assert_eq!(loaded.parameter_count(), Some(expected_params));

        assert_eq!(manifest.files.len(), 3);
        assert!(manifest.files.iter().all(|f| f.sha256.len() == 64));

        // Same weights in memory and on disk give the same answer
        let from_disk = predict(&sample("Recon"), &loaded).unwrap();
        let in_memory = LoadedArtifacts::Model(ModelArtifacts {
            classifier: Box::new(lightweight_network(classes.len())),
            scaler: fixed_scaler(),
            catalog: ClassCatalog::new(classes).unwrap(),
        });
        let expected = predict(&sample("Recon"), &in_memory).unwrap();
        assert_eq!(from_disk.probabilities, expected.probabilities);
    }

    #[test]
    fn test_force_fallback_ignores_model() {
        let dir = tempdir().unwrap();
        write_model_dir(dir.path(), &["Benign", "DDoS"]);

        let config = DetectorConfig {
            force_fallback: true,
            ..DetectorConfig::with_model_dir(dir.path())
        };
        let (loaded, _) = artifacts::load(&config).unwrap();
        assert_eq!(loaded.mode(), DetectorMode::Fallback);
        assert_eq!(loaded.catalog().labels(), &["Benign", "DDoS"]);
    }

    #[test]
    fn test_malformed_scaler_is_an_error() {
        let dir = tempdir().unwrap();
        write_model_dir(dir.path(), &["Benign", "DDoS"]);
        std::fs::write(dir.path().join("scaler.json"), "not json").unwrap();

        let err = artifacts::load(&DetectorConfig::with_model_dir(dir.path())).unwrap_err();
        assert!(matches!(err, ThreatError::ArtifactFormat { .. }));
    }

    #[test]
    fn test_class_count_mismatch_is_an_error() {
        let dir = tempdir().unwrap();
        write_scaler(dir.path());
        write_label_encoder(dir.path(), &["Benign", "DDoS", "Malware"]);
        write_weights(dir.path(), 4);

        let err = artifacts::load(&DetectorConfig::with_model_dir(dir.path())).unwrap_err();
        assert!(matches!(err, ThreatError::Architecture(_)));
    }

    #[test]
    fn test_cache_loads_once() {
        let dir = tempdir().unwrap();
        write_model_dir(dir.path(), &["Benign", "DDoS"]);
        let config = DetectorConfig::with_model_dir(dir.path());

        let cache = ArtifactCache::new();
        assert!(!cache.is_loaded());

        let first = cache.get_or_load(&config).unwrap();
        std::fs::remove_file(dir.path().join("best_model.json")).unwrap();
        let second = cache.get_or_load(&config).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.mode(), DetectorMode::Model);
        assert_eq!(cache.manifest().map(|m| m.mode), Some(DetectorMode::Model));
    }

    // ------------------------------------------------------------------------
    // Detector
    // ------------------------------------------------------------------------

    #[test]
    fn test_detector_tracks_predictions() {
        let dir = tempdir().unwrap();
        let detector = Detector::init(&DetectorConfig::with_model_dir(dir.path())).unwrap();
        assert_eq!(detector.mode(), DetectorMode::Fallback);

        for s in samples::SAMPLES {
            detector.predict(&s.to_vector().unwrap()).unwrap();
        }

        let status = detector.status();
        assert_eq!(status.inference_count, samples::SAMPLES.len() as u64);
        assert_eq!(status.mode, DetectorMode::Fallback);
        assert_eq!(status.classes.len(), DEMO_CLASSES.len());
        assert!(detector.manifest().is_some());
    }

    #[test]
    fn test_detector_from_shared_artifacts() {
        let shared = Arc::new(LoadedArtifacts::demo());
        let a = Detector::from_artifacts(Arc::clone(&shared));
        let b = Detector::from_artifacts(Arc::clone(&shared));

        let features = sample("Malware");
        assert_eq!(
            a.predict(&features).unwrap().probabilities,
            b.predict(&features).unwrap().probabilities
        );
        assert!(a.manifest().is_none());
    }
}
