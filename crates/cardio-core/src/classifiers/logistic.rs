//! Logistic regression classifier.
//!
//! Batch gradient descent on the log-loss. Weights start at zero, so for
//! a fixed dataset the fit is fully deterministic.

use serde::{Deserialize, Serialize};

use crate::classifiers::{check_training_data, sigmoid, Classifier};
use crate::error::{CardioError, Result};

/// Linear classifier trained with batch gradient descent
///
/// # Example
///
/// ```rust
/// use cardio_core::prelude::*;
///
/// let x = vec![vec![-2.0], vec![-1.0], vec![1.0], vec![2.0]];
/// let y = vec![0, 0, 1, 1];
/// let mut model = LogisticRegression::new();
/// model.fit(&x, &y).unwrap();
/// assert_eq!(model.predict(&[1.5]).unwrap(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    weights: Vec<f64>,
    bias: f64,
    learning_rate: f64,
    epochs: usize,
    fitted: bool,
}

impl LogisticRegression {
    /// Create a model with default hyperparameters
    pub fn new() -> Self {
        Self {
            weights: Vec::new(),
            bias: 0.0,
            learning_rate: 0.1,
            epochs: 500,
            fitted: false,
        }
    }

    /// Set the gradient-descent learning rate
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the number of full-batch epochs
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Fitted feature weights
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Fitted bias term
    pub fn bias(&self) -> f64 {
        self.bias
    }

    fn score(&self, row: &[f64]) -> Result<f64> {
        if !self.fitted {
            return Err(CardioError::NotFitted);
        }
        if row.len() != self.weights.len() {
            return Err(CardioError::InvalidData(format!(
                "row has {} columns, model was fitted on {}",
                row.len(),
                self.weights.len()
            )));
        }
        let z: f64 = self
            .weights
            .iter()
            .zip(row.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias;
        Ok(z)
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for LogisticRegression {
    fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) -> Result<()> {
        check_training_data(x, y)?;
        if self.learning_rate <= 0.0 || !self.learning_rate.is_finite() {
            return Err(CardioError::InvalidParameter {
                name: "learning_rate".to_string(),
                reason: "must be a positive finite number".to_string(),
            });
        }

        let n = x.len() as f64;
        let width = x[0].len();
        let mut weights = vec![0.0; width];
        let mut bias = 0.0;

        for _ in 0..self.epochs {
            let mut grad_w = vec![0.0; width];
            let mut grad_b = 0.0;

            for (row, &label) in x.iter().zip(y.iter()) {
                let z: f64 = weights
                    .iter()
                    .zip(row.iter())
                    .map(|(w, v)| w * v)
                    .sum::<f64>()
                    + bias;
                let err = sigmoid(z) - label as f64;
                for (g, &v) in grad_w.iter_mut().zip(row.iter()) {
                    *g += err * v;
                }
                grad_b += err;
            }

            for (w, g) in weights.iter_mut().zip(grad_w.iter()) {
                *w -= self.learning_rate * g / n;
            }
            bias -= self.learning_rate * grad_b / n;
        }

        if weights.iter().any(|w| !w.is_finite()) || !bias.is_finite() {
            return Err(CardioError::NumericalError(
                "gradient descent diverged".to_string(),
            ));
        }

        self.weights = weights;
        self.bias = bias;
        self.fitted = true;
        Ok(())
    }

    fn predict(&self, row: &[f64]) -> Result<u8> {
        Ok(if self.predict_probability(row)? >= 0.5 {
            1
        } else {
            0
        })
    }

    fn predict_probability(&self, row: &[f64]) -> Result<f64> {
        Ok(sigmoid(self.score(row)?))
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}
