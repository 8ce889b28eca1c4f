//! # cardio-core
//!
//! Core library for heart-disease risk prediction: the typed patient
//! feature vector, a fitted standardization scaler, and binary
//! classifiers that share one training/inference contract.
//!
//! ## Classifiers
//!
//! - **Logistic Regression** - gradient-descent linear classifier
//! - **Random Forest** - bagged Gini decision trees
//! - **Gradient Boosting** - boosted regression trees on logistic loss
//!
//! Every fitted model and the scaler serialize with serde, so a training
//! run can persist them and a serving process can load them unchanged.
//!
//! ## Example
//!
//! ```rust
//! use cardio_core::prelude::*;
//!
//! let x = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
//! let y = vec![0, 0, 1, 1];
//! let mut model = LogisticRegression::new();
//! model.fit(&x, &y).unwrap();
//! let label = model.predict(&[1.0, 0.5]).unwrap();
//! assert!(label == 0 || label == 1);
//! ```

pub mod classifiers;
pub mod features;
pub mod scaler;
pub mod utils;
mod error;

pub use error::{CardioError, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::classifiers::Classifier;
    pub use crate::classifiers::boosted::GradientBoosting;
    pub use crate::classifiers::forest::RandomForest;
    pub use crate::classifiers::logistic::LogisticRegression;
    pub use crate::classifiers::tree::{DecisionTree, RegressionTree};
    pub use crate::error::{CardioError, Result};
    pub use crate::features::{
        ChestPainType, FeatureVector, RestingEcg, Sex, StSlope, Thalassemia, FEATURE_NAMES,
        N_FEATURES,
    };
    pub use crate::scaler::StandardScaler;
}
