//! Decision trees.
//!
//! Two CART variants over a shared node representation:
//!
//! - [`DecisionTree`] - binary classification, Gini impurity splits,
//!   leaves hold the positive-class fraction. Used standalone and as the
//!   base learner of the random forest.
//! - [`RegressionTree`] - squared-error splits, leaves hold the target
//!   mean. Base learner of the gradient-boosting ensemble.
//!
//! Split search scans sorted column values and places thresholds at
//! midpoints between distinct neighbors, keeping fits deterministic for a
//! fixed dataset (and a fixed RNG when feature subsampling is on).

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::classifiers::{check_training_data, Classifier};
use crate::error::{CardioError, Result};

/// One tree node: either a leaf value or a threshold split.
#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn eval(&self, row: &[f64]) -> f64 {
        match self {
            Node::Leaf { value } => *value,
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if row[*feature] <= *threshold {
                    left.eval(row)
                } else {
                    right.eval(row)
                }
            }
        }
    }
}

fn check_row_width(row: &[f64], expected: usize) -> Result<()> {
    if row.len() != expected {
        return Err(CardioError::InvalidData(format!(
            "row has {} columns, model was fitted on {}",
            row.len(),
            expected
        )));
    }
    Ok(())
}

/// Pick `mtry` distinct feature indices, ascending for a deterministic
/// scan order given a deterministic RNG.
fn sample_features(n_features: usize, mtry: usize, rng: &mut StdRng) -> Vec<usize> {
    let mut pool: Vec<usize> = (0..n_features).collect();
    let take = mtry.min(n_features);
    for i in 0..take {
        let j = rng.gen_range(i..n_features);
        pool.swap(i, j);
    }
    let mut picked: Vec<usize> = pool[..take].to_vec();
    picked.sort_unstable();
    picked
}

// ---------------------------------------------------------------------------
// Classification tree
// ---------------------------------------------------------------------------

/// Binary classification tree split on Gini impurity
///
/// # Example
///
/// ```rust
/// use cardio_core::prelude::*;
///
/// let x = vec![vec![1.0], vec![2.0], vec![10.0], vec![11.0]];
/// let y = vec![0, 0, 1, 1];
/// let mut tree = DecisionTree::new();
/// tree.fit(&x, &y).unwrap();
/// assert_eq!(tree.predict(&[10.5]).unwrap(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Option<Node>,
    n_features: usize,
    max_depth: usize,
    min_samples_split: usize,
    fitted: bool,
}

impl DecisionTree {
    /// Create a tree with default depth limits
    pub fn new() -> Self {
        Self {
            root: None,
            n_features: 0,
            max_depth: 12,
            min_samples_split: 2,
            fitted: false,
        }
    }

    /// Set the maximum tree depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Set the minimum number of rows required to attempt a split
    pub fn with_min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.min_samples_split = min_samples_split.max(2);
        self
    }

    /// Fit on a row subset, optionally trying only `mtry` random features
    /// per split. The forest uses this with its bootstrap sample and a
    /// seeded RNG; `fit` delegates here with every row and every feature.
    pub(crate) fn fit_sampled(
        &mut self,
        x: &[Vec<f64>],
        y: &[u8],
        indices: &[usize],
        mtry: Option<usize>,
        mut rng: Option<&mut StdRng>,
    ) -> Result<()> {
        check_training_data(x, y)?;
        if indices.is_empty() {
            return Err(CardioError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }

        let n_features = x[0].len();
        let root = build_classification_node(
            x,
            y,
            indices,
            0,
            self.max_depth,
            self.min_samples_split,
            mtry.unwrap_or(n_features),
            &mut rng,
        );

        self.root = Some(root);
        self.n_features = n_features;
        self.fitted = true;
        Ok(())
    }
}

impl Default for DecisionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for DecisionTree {
    fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) -> Result<()> {
        let indices: Vec<usize> = (0..x.len()).collect();
        self.fit_sampled(x, y, &indices, None, None)
    }

    fn predict(&self, row: &[f64]) -> Result<u8> {
        Ok(if self.predict_probability(row)? >= 0.5 {
            1
        } else {
            0
        })
    }

    fn predict_probability(&self, row: &[f64]) -> Result<f64> {
        let root = self.root.as_ref().ok_or(CardioError::NotFitted)?;
        check_row_width(row, self.n_features)?;
        Ok(root.eval(row))
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}

fn gini(pos: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = pos as f64 / total as f64;
    2.0 * p * (1.0 - p)
}

#[allow(clippy::too_many_arguments)]
fn build_classification_node(
    x: &[Vec<f64>],
    y: &[u8],
    indices: &[usize],
    depth: usize,
    max_depth: usize,
    min_samples_split: usize,
    mtry: usize,
    rng: &mut Option<&mut StdRng>,
) -> Node {
    let total = indices.len();
    let pos = indices.iter().filter(|&&i| y[i] == 1).count();
    let leaf = Node::Leaf {
        value: pos as f64 / total as f64,
    };

    if depth >= max_depth || total < min_samples_split || pos == 0 || pos == total {
        return leaf;
    }

    let n_features = x[0].len();
    let features: Vec<usize> = match rng {
        Some(r) => sample_features(n_features, mtry, r),
        None => (0..n_features).collect(),
    };

    let parent_impurity = gini(pos, total);
    let mut best: Option<(usize, f64, f64)> = None;

    for &feature in &features {
        let mut column: Vec<(f64, u8)> = indices.iter().map(|&i| (x[i][feature], y[i])).collect();
        column.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut left_pos = 0usize;
        for split_at in 1..total {
            if column[split_at - 1].1 == 1 {
                left_pos += 1;
            }
            if column[split_at].0 <= column[split_at - 1].0 {
                continue;
            }

            let left_n = split_at;
            let right_n = total - split_at;
            let right_pos = pos - left_pos;
            let weighted = (left_n as f64 * gini(left_pos, left_n)
                + right_n as f64 * gini(right_pos, right_n))
                / total as f64;

            if weighted + 1e-12 < best.map_or(parent_impurity, |(_, _, g)| g) {
                let threshold = (column[split_at - 1].0 + column[split_at].0) / 2.0;
                best = Some((feature, threshold, weighted));
            }
        }
    }

    let Some((feature, threshold, _)) = best else {
        return leaf;
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| x[i][feature] <= threshold);

    if left_idx.is_empty() || right_idx.is_empty() {
        return leaf;
    }

    Node::Split {
        feature,
        threshold,
        left: Box::new(build_classification_node(
            x,
            y,
            &left_idx,
            depth + 1,
            max_depth,
            min_samples_split,
            mtry,
            rng,
        )),
        right: Box::new(build_classification_node(
            x,
            y,
            &right_idx,
            depth + 1,
            max_depth,
            min_samples_split,
            mtry,
            rng,
        )),
    }
}

// ---------------------------------------------------------------------------
// Regression tree
// ---------------------------------------------------------------------------

/// Regression tree split on squared-error reduction, with mean leaves.
///
/// Fits continuous targets; the gradient-boosting ensemble fits these to
/// per-round residuals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    root: Option<Node>,
    n_features: usize,
    max_depth: usize,
    min_samples_split: usize,
    fitted: bool,
}

impl RegressionTree {
    /// Create a shallow regression tree (depth 3 by default)
    pub fn new() -> Self {
        Self {
            root: None,
            n_features: 0,
            max_depth: 3,
            min_samples_split: 2,
            fitted: false,
        }
    }

    /// Set the maximum tree depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Fit to continuous targets
    pub fn fit(&mut self, x: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        if x.is_empty() {
            return Err(CardioError::InsufficientData {
                required: 2,
                actual: 0,
            });
        }
        if x.len() != targets.len() {
            return Err(CardioError::InvalidData(format!(
                "{} feature rows but {} targets",
                x.len(),
                targets.len()
            )));
        }
        let width = x[0].len();
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
        if targets.iter().any(|t| !t.is_finite()) {
            return Err(CardioError::NumericalError(
                "regression targets must be finite".to_string(),
            ));
        }

        let indices: Vec<usize> = (0..x.len()).collect();
        let root = build_regression_node(
            x,
            targets,
            &indices,
            0,
            self.max_depth,
            self.min_samples_split,
        );

        self.root = Some(root);
        self.n_features = width;
        self.fitted = true;
        Ok(())
    }

    /// Predicted value for one feature row
    pub fn predict_value(&self, row: &[f64]) -> Result<f64> {
        let root = self.root.as_ref().ok_or(CardioError::NotFitted)?;
        check_row_width(row, self.n_features)?;
        Ok(root.eval(row))
    }

    /// Whether the tree has been fitted
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }
}

impl Default for RegressionTree {
    fn default() -> Self {
        Self::new()
    }
}

fn build_regression_node(
    x: &[Vec<f64>],
    targets: &[f64],
    indices: &[usize],
    depth: usize,
    max_depth: usize,
    min_samples_split: usize,
) -> Node {
    let total = indices.len();
    let sum: f64 = indices.iter().map(|&i| targets[i]).sum();
    let mean = sum / total as f64;
    let leaf = Node::Leaf { value: mean };

    if depth >= max_depth || total < min_samples_split {
        return leaf;
    }

    // SSE of a side via sum and sum of squares: sse = sum_sq - sum^2 / n
    let parent_sse: f64 = indices.iter().map(|&i| (targets[i] - mean).powi(2)).sum();
    if parent_sse < 1e-12 {
        return leaf;
    }

    let n_features = x[0].len();
    let mut best: Option<(usize, f64, f64)> = None;

    for feature in 0..n_features {
        let mut column: Vec<(f64, f64)> =
            indices.iter().map(|&i| (x[i][feature], targets[i])).collect();
        column.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let total_sum: f64 = column.iter().map(|(_, t)| t).sum();
        let total_sq: f64 = column.iter().map(|(_, t)| t * t).sum();

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for split_at in 1..total {
            let t = column[split_at - 1].1;
            left_sum += t;
            left_sq += t * t;
            if column[split_at].0 <= column[split_at - 1].0 {
                continue;
            }

            let left_n = split_at as f64;
            let right_n = (total - split_at) as f64;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let sse =
                (left_sq - left_sum * left_sum / left_n) + (right_sq - right_sum * right_sum / right_n);

            if sse + 1e-12 < best.map_or(parent_sse, |(_, _, s)| s) {
                let threshold = (column[split_at - 1].0 + column[split_at].0) / 2.0;
                best = Some((feature, threshold, sse));
            }
        }
    }

    let Some((feature, threshold, _)) = best else {
        return leaf;
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| x[i][feature] <= threshold);

    if left_idx.is_empty() || right_idx.is_empty() {
        return leaf;
    }

    Node::Split {
        feature,
        threshold,
        left: Box::new(build_regression_node(
            x,
            targets,
            &left_idx,
            depth + 1,
            max_depth,
            min_samples_split,
        )),
        right: Box::new(build_regression_node(
            x,
            targets,
            &right_idx,
            depth + 1,
            max_depth,
            min_samples_split,
        )),
    }
}
