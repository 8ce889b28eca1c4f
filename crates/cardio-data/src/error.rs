//! Dataset error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a training dataset.
///
/// Every variant is fatal to a training run: the trainer aborts before
/// any fit and writes no artifacts.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Dataset file does not exist
    #[error("Dataset file not found: {0}")]
    FileNotFound(PathBuf),

    /// Underlying I/O failure
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header
    #[error("Missing column '{0}' in dataset header")]
    MissingColumn(String),

    /// A cell that should be numeric is not
    #[error("Non-numeric value in column '{column}' at line {line}")]
    NonNumeric { column: String, line: usize },

    /// A target value outside {0, 1}
    #[error("Invalid target label at line {line}: expected 0 or 1")]
    InvalidLabel { line: usize },

    /// The dataset has no rows
    #[error("Dataset has no rows")]
    Empty,

    /// Every row carries the same label
    #[error("Dataset contains a single class label; both classes are required")]
    SingleClass,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_message() {
        let error = DatasetError::MissingColumn("target".to_string());
        assert_eq!(error.to_string(), "Missing column 'target' in dataset header");
    }

    #[test]
    fn test_non_numeric_message() {
        let error = DatasetError::NonNumeric {
            column: "chol".to_string(),
            line: 17,
        };
        assert_eq!(
            error.to_string(),
            "Non-numeric value in column 'chol' at line 17"
        );
    }

    #[test]
    fn test_error_implements_std_error() {
        fn assert_std_error<E: std::error::Error>() {}
        assert_std_error::<DatasetError>();
    }
}
