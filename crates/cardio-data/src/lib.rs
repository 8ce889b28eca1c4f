//! # cardio-data
//!
//! Tabular dataset handling for the training pipeline: CSV loading keyed
//! by the pinned feature column names, mean imputation of missing cells,
//! structural validation, and a seeded train/test split.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cardio_data::Dataset;
//! use std::path::Path;
//!
//! let mut dataset = Dataset::from_csv(Path::new("heart.csv")).unwrap();
//! dataset.impute_missing();
//! dataset.validate().unwrap();
//! let (train, eval) = dataset.train_test_split(0.2, 42);
//! assert!(train.len() > eval.len());
//! ```

mod dataset;
mod error;
mod split;

pub use dataset::Dataset;
pub use error::DatasetError;

/// Result type for dataset operations
pub type Result<T> = std::result::Result<T, DatasetError>;
