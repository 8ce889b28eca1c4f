//! Gradient-boosted tree classifier.
//!
//! Additive model on the logistic loss: the raw score starts at the
//! log-odds of the training base rate, and each round fits a shallow
//! regression tree to the current residuals `y - sigmoid(score)` and adds
//! it with a shrinkage factor. Probabilities come from the sigmoid of the
//! final score. Fitting has no sampling step and is deterministic.

use serde::{Deserialize, Serialize};

use crate::classifiers::tree::RegressionTree;
use crate::classifiers::{check_training_data, sigmoid, Classifier};
use crate::error::{CardioError, Result};

/// Boosted ensemble of shallow regression trees
///
/// # Example
///
/// ```rust
/// use cardio_core::prelude::*;
///
/// let x: Vec<Vec<f64>> = (0..30).map(|i| vec![i as f64]).collect();
/// let y: Vec<u8> = (0..30).map(|i| if i < 15 { 0 } else { 1 }).collect();
/// let mut model = GradientBoosting::new();
/// model.fit(&x, &y).unwrap();
/// assert_eq!(model.predict(&[28.0]).unwrap(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoosting {
    init_score: f64,
    trees: Vec<RegressionTree>,
    n_rounds: usize,
    learning_rate: f64,
    max_depth: usize,
    fitted: bool,
}

impl GradientBoosting {
    /// Create a model with default hyperparameters (100 rounds of depth-3
    /// trees, learning rate 0.1)
    pub fn new() -> Self {
        Self {
            init_score: 0.0,
            trees: Vec::new(),
            n_rounds: 100,
            learning_rate: 0.1,
            max_depth: 3,
            fitted: false,
        }
    }

    /// Set the number of boosting rounds
    pub fn with_n_rounds(mut self, n_rounds: usize) -> Self {
        self.n_rounds = n_rounds.max(1);
        self
    }

    /// Set the shrinkage factor applied to each tree
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the depth of each boosted tree
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Number of fitted boosting rounds
    pub fn n_rounds(&self) -> usize {
        self.trees.len()
    }

    fn raw_score(&self, row: &[f64]) -> Result<f64> {
        if !self.fitted {
            return Err(CardioError::NotFitted);
        }
        let mut score = self.init_score;
        for tree in &self.trees {
            score += self.learning_rate * tree.predict_value(row)?;
        }
        Ok(score)
    }
}

impl Default for GradientBoosting {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for GradientBoosting {
    fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) -> Result<()> {
        check_training_data(x, y)?;
        if self.learning_rate <= 0.0 || !self.learning_rate.is_finite() {
            return Err(CardioError::InvalidParameter {
                name: "learning_rate".to_string(),
                reason: "must be a positive finite number".to_string(),
            });
        }

        let n = x.len();
        // Log-odds of the base rate, clamped away from the degenerate
        // single-class endpoints.
        let base_rate = (y.iter().filter(|&&l| l == 1).count() as f64 / n as f64)
            .clamp(1e-6, 1.0 - 1e-6);
        let init_score = (base_rate / (1.0 - base_rate)).ln();

        let mut scores = vec![init_score; n];
        let mut trees = Vec::with_capacity(self.n_rounds);

        for _ in 0..self.n_rounds {
            let residuals: Vec<f64> = scores
                .iter()
                .zip(y.iter())
                .map(|(&s, &label)| label as f64 - sigmoid(s))
                .collect();

            let mut tree = RegressionTree::new().with_max_depth(self.max_depth);
            tree.fit(x, &residuals)?;

            for (score, row) in scores.iter_mut().zip(x.iter()) {
                *score += self.learning_rate * tree.predict_value(row)?;
            }
            trees.push(tree);
        }

        self.init_score = init_score;
        self.trees = trees;
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
        Ok(sigmoid(self.raw_score(row)?))
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}
