//! Binary classifiers for heart-disease risk.
//!
//! All candidate models implement the [`Classifier`] trait so that
//! training, selection, and serving can treat them uniformly. Inputs are
//! feature rows already passed through the fitted scaler; labels are 0
//! (no disease) and 1 (disease).

pub mod boosted;
pub mod forest;
pub mod logistic;
pub mod tree;

/// Common trait for all binary classifiers
pub trait Classifier {
    /// Fit the model to scaled feature rows and their labels
    fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) -> crate::Result<()>;

    /// Predict the class label for one scaled feature row
    fn predict(&self, row: &[f64]) -> crate::Result<u8>;

    /// Probability of the positive class for one scaled feature row
    fn predict_probability(&self, row: &[f64]) -> crate::Result<f64>;

    /// Check if the model has been fitted
    fn is_fitted(&self) -> bool;
}

/// Shared fit-input validation: non-empty, consistent widths, labels in {0, 1}.
pub(crate) fn check_training_data(x: &[Vec<f64>], y: &[u8]) -> crate::Result<()> {
    use crate::CardioError;

    if x.is_empty() {
        return Err(CardioError::InsufficientData {
            required: 2,
            actual: 0,
        });
    }
    if x.len() != y.len() {
        return Err(CardioError::InvalidData(format!(
            "{} feature rows but {} labels",
            x.len(),
            y.len()
        )));
    }
    let width = x[0].len();
    if width == 0 {
        return Err(CardioError::InvalidData("feature rows are empty".to_string()));
    }
    for (i, row) in x.iter().enumerate() {
        if row.len() != width {
            return Err(CardioError::InvalidData(format!(
                "row {} has {} columns, expected {}",
                i,
                row.len(),
                width
            )));
        }
    }
    if let Some(&bad) = y.iter().find(|&&label| label > 1) {
        return Err(CardioError::InvalidData(format!(
            "labels must be 0 or 1, got {}",
            bad
        )));
    }
    Ok(())
}

/// Numerically stable logistic sigmoid.
pub(crate) fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
