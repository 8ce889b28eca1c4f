//! # cardio-cli
//!
//! Command-line interface for the heart-disease risk system: `train`
//! runs the offline pipeline and persists the winning model, `predict`
//! scores one patient record against the persisted artifacts.

use std::path::PathBuf;
use std::process::ExitCode;

use cardio_automl::prelude::*;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cardio")]
#[command(about = "Heart-disease risk prediction", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train candidate models and persist the best one
    Train {
        /// Labeled dataset CSV (13 feature columns plus `target`)
        #[arg(short, long)]
        data: PathBuf,

        /// Directory for the model and scaler artifacts
        #[arg(short, long, default_value = "artifacts")]
        artifacts: PathBuf,

        /// Held-out evaluation fraction
        #[arg(long, default_value = "0.2")]
        test_ratio: f64,

        /// Split and sampling seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Predict risk for one patient record
    Predict {
        /// Patient record as JSON (see docs for the field layout)
        #[arg(short, long)]
        input: PathBuf,

        /// Directory holding the trained artifacts
        #[arg(short, long, default_value = "artifacts")]
        artifacts: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Train {
            data,
            artifacts,
            test_ratio,
            seed,
        } => run_train(data, artifacts, test_ratio, seed),
        Commands::Predict { input, artifacts } => run_predict(input, artifacts),
    }
}

fn run_train(data: PathBuf, artifacts: PathBuf, test_ratio: f64, seed: u64) -> ExitCode {
    let config = TrainerConfig::new(data, artifacts)
        .with_test_ratio(test_ratio)
        .with_seed(seed);

    match Trainer::new(config).train() {
        Ok(report) => {
            println!("Model accuracies:");
            for (kind, accuracy) in &report.scores {
                println!("  {:<20} {:.4}", kind.to_string(), accuracy);
            }
            println!(
                "Best model: {} with {:.4} accuracy",
                report.best, report.best_accuracy
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Training failed: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run_predict(input: PathBuf, artifacts: PathBuf) -> ExitCode {
    let patient: FeatureVector = match std::fs::read_to_string(&input)
        .map_err(|e| e.to_string())
        .and_then(|json| serde_json::from_str(&json).map_err(|e| e.to_string()))
    {
        Ok(patient) => patient,
        Err(err) => {
            eprintln!("Failed to read patient record {}: {}", input.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let store = ArtifactStore::new(artifacts);
    let predictor = match RiskPredictor::from_store(&store) {
        Ok(predictor) => predictor,
        Err(PredictError::ArtifactsUnavailable(_)) => {
            eprintln!("No trained model found - run `cardio train` first.");
            return ExitCode::FAILURE;
        }
        Err(err) => {
            eprintln!("Prediction failed: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match predictor.predict(&patient) {
        Ok(assessment) => {
            let percentage = assessment.probability * 100.0;
            if assessment.is_high_risk() {
                println!("High risk of heart disease (probability: {:.2}%)", percentage);
                println!("Please consult a cardiologist for further evaluation.");
            } else {
                println!("Low risk of heart disease (probability: {:.2}%)", percentage);
                println!("Keep maintaining a healthy lifestyle.");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Prediction failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
