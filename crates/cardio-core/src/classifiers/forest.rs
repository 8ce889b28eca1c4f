//! Random forest classifier.
//!
//! Bags 100 Gini trees, each fitted on a bootstrap sample of the rows
//! with a random feature subset tried at every split. Every tree gets its
//! own `StdRng` seeded from the forest seed plus the tree index, so two
//! fits on the same data produce identical forests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::classifiers::tree::DecisionTree;
use crate::classifiers::{check_training_data, Classifier};
use crate::error::{CardioError, Result};

/// Bagged ensemble of decision trees
///
/// # Example
///
/// ```rust
/// use cardio_core::prelude::*;
///
/// let x: Vec<Vec<f64>> = (0..30).map(|i| vec![i as f64, (i % 7) as f64]).collect();
/// let y: Vec<u8> = (0..30).map(|i| if i < 15 { 0 } else { 1 }).collect();
/// let mut forest = RandomForest::new();
/// forest.fit(&x, &y).unwrap();
/// assert_eq!(forest.predict(&[28.0, 3.0]).unwrap(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_trees: usize,
    max_depth: usize,
    seed: u64,
    fitted: bool,
}

impl RandomForest {
    /// Create a forest with default hyperparameters (100 trees)
    pub fn new() -> Self {
        Self {
            trees: Vec::new(),
            n_trees: 100,
            max_depth: 12,
            seed: 42,
            fitted: false,
        }
    }

    /// Set the number of trees
    pub fn with_n_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees.max(1);
        self
    }

    /// Set the maximum depth of each tree
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Set the sampling seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of fitted trees
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Default for RandomForest {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for RandomForest {
    fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) -> Result<()> {
        check_training_data(x, y)?;

        let n = x.len();
        let n_features = x[0].len();
        // Features tried per split: floor(sqrt(n_features)), the usual
        // classification default.
        let mtry = ((n_features as f64).sqrt() as usize).max(1);

        let mut trees = Vec::with_capacity(self.n_trees);
        for t in 0..self.n_trees {
            let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(t as u64));

            let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();

            let mut tree = DecisionTree::new().with_max_depth(self.max_depth);
            tree.fit_sampled(x, y, &indices, Some(mtry), Some(&mut rng))?;
            trees.push(tree);
        }

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
        if !self.fitted {
            return Err(CardioError::NotFitted);
        }
        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.predict_probability(row)?;
        }
        Ok(sum / self.trees.len() as f64)
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}
