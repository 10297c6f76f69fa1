//! Threat Classifier CLI
//!
//! Usage:
//!   threat-classifier [FILE]           features as a JSON object (stdin when omitted)
//!   threat-classifier --sample NAME    one of the built-in samples
//!   threat-classifier --status         loaded artifacts and mode

use std::collections::HashMap;
use std::io::Read;

use anyhow::{bail, Context, Result};

use threat_classifier::constants::{APP_NAME, APP_VERSION, DEFAULT_LOG_FILTER};
use threat_classifier::{samples, Assessment, Detector, DetectorConfig, FeatureVector};

enum Input {
    Stdin,
    File(String),
    Sample(String),
    Status,
}

fn parse_args() -> Result<Input> {
    let mut args = std::env::args().skip(1);
    let input = match args.next().as_deref() {
        None | Some("-") => Input::Stdin,
        Some("--sample") => match args.next() {
            Some(name) => Input::Sample(name),
            None => bail!("--sample needs a name"),
        },
        Some("--status") => Input::Status,
        Some(flag) if flag.starts_with("--") => bail!("unknown option {}", flag),
        Some(path) => Input::File(path.to_string()),
    };
    if let Some(extra) = args.next() {
        bail!("unexpected argument {}", extra);
    }
    Ok(input)
}

fn read_features(json: &str) -> Result<FeatureVector> {
    let values: HashMap<String, f64> =
        serde_json::from_str(json).context("features must be a JSON object of name -> number")?;
    Ok(FeatureVector::from_map(&values)?)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    log::info!("Starting {} v{}", APP_NAME, APP_VERSION);

    let input = parse_args()?;
    let config = DetectorConfig::from_env();
    let detector = Detector::init(&config).context("failed to load model artifacts")?;

    let features = match input {
        Input::Status => {
            let status = serde_json::json!({
                "status": detector.status(),
                "manifest": detector.manifest(),
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
            return Ok(());
        }
        Input::Sample(name) => samples::find(&name)
            .with_context(|| format!("no sample named {}", name))?
            .to_vector()?,
        Input::File(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path))?;
            read_features(&json)?
        }
        Input::Stdin => {
            let mut json = String::new();
            std::io::stdin()
                .read_to_string(&mut json)
                .context("failed to read stdin")?;
            read_features(&json)?
        }
    };

    let prediction = detector.predict(&features)?;
    let assessment = Assessment::new(prediction);
    println!("{}", serde_json::to_string_pretty(&assessment)?);

    Ok(())
}
