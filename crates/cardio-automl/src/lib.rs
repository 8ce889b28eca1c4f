//! # cardio-automl
//!
//! The training-and-serving halves of the heart-disease risk system.
//!
//! Training: load a labeled dataset, impute and validate it, split with a
//! fixed seed, fit a standard scaler on the training split, fit every
//! candidate classifier in the registry, pick the one with the highest
//! held-out accuracy, and persist the winner plus the scaler as two
//! artifacts.
//!
//! Serving: load the two artifacts once into a [`RiskPredictor`] and run
//! scale-then-predict for one patient at a time.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cardio_automl::prelude::*;
//! use std::path::PathBuf;
//!
//! let config = TrainerConfig::new(PathBuf::from("heart.csv"), PathBuf::from("artifacts"));
//! let report = Trainer::new(config).train().unwrap();
//! println!("best model: {} ({:.4})", report.best, report.best_accuracy);
//! ```

mod artifacts;
mod predictor;
mod registry;
mod trainer;

pub use artifacts::{ArtifactError, ArtifactStore};
pub use predictor::{PredictError, RiskAssessment, RiskPredictor};
pub use registry::{select_best, CandidateKind, TrainedClassifier};
pub use trainer::{TrainError, Trainer, TrainerConfig, TrainingReport};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::artifacts::{ArtifactError, ArtifactStore};
    pub use crate::predictor::{PredictError, RiskAssessment, RiskPredictor};
    pub use crate::registry::{CandidateKind, TrainedClassifier};
    pub use crate::trainer::{TrainError, Trainer, TrainerConfig, TrainingReport};
    pub use cardio_core::prelude::*;
}
