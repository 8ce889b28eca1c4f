//! Per-column standardization fitted at training time.
//!
//! The scaler is fitted once on the training split, persisted next to the
//! winning model, and reused unchanged at inference so that live inputs
//! go through exactly the transform the model was trained on.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CardioError, Result};

/// Divisor floor for zero-variance columns. A constant column would
/// otherwise standardize to infinity; with the floor it stays finite
/// (training rows map to 0), which is the documented degenerate-feature
/// behavior.
const MIN_STD: f64 = 1e-10;

/// Standardizes each feature column to zero mean and unit variance using
/// statistics frozen at fit time.
///
/// # Example
///
/// ```rust
/// use cardio_core::scaler::StandardScaler;
///
/// let rows = vec![vec![1.0, 10.0], vec![2.0, 20.0], vec![3.0, 30.0]];
/// let mut scaler = StandardScaler::new();
/// scaler.fit(&rows).unwrap();
/// let scaled = scaler.transform(&[2.0, 20.0]).unwrap();
/// assert!(scaled.iter().all(|v| v.abs() < 1e-9));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    std_devs: Vec<f64>,
    fitted: bool,
}

impl StandardScaler {
    /// Create an unfitted scaler
    pub fn new() -> Self {
        Self {
            means: Vec::new(),
            std_devs: Vec::new(),
            fitted: false,
        }
    }

    /// Per-column means frozen at fit time
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Per-column standard deviations frozen at fit time
    pub fn std_devs(&self) -> &[f64] {
        &self.std_devs
    }

    /// Whether the scaler has been fitted
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Compute per-column mean and standard deviation over `rows`.
    ///
    /// Every column is standardized, categorical codes included; the
    /// feature matrix is treated as uniformly numeric. Columns with
    /// (near-)zero variance are logged and given a floored divisor.
    pub fn fit(&mut self, rows: &[Vec<f64>]) -> Result<()> {
        if rows.is_empty() {
            return Err(CardioError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        let n_cols = rows[0].len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(CardioError::InvalidData(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    n_cols
                )));
            }
        }

        let n = rows.len() as f64;
        let mut means = vec![0.0; n_cols];
        for row in rows {
            for (m, &v) in means.iter_mut().zip(row.iter()) {
                *m += v;
            }
        }
        for m in &mut means {
            *m /= n;
        }

        let mut std_devs = vec![0.0; n_cols];
        for row in rows {
            for (s, (&v, &m)) in std_devs.iter_mut().zip(row.iter().zip(means.iter())) {
                *s += (v - m).powi(2);
            }
        }
        for (col, s) in std_devs.iter_mut().enumerate() {
            *s = (*s / n).sqrt();
            if *s < MIN_STD {
                warn!("zero-variance feature column {}, flooring divisor", col);
                *s = MIN_STD;
            }
        }

        self.means = means;
        self.std_devs = std_devs;
        self.fitted = true;
        Ok(())
    }

    /// Standardize one row with the frozen statistics, in fit order.
    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(CardioError::NotFitted);
        }
        if row.len() != self.means.len() {
            return Err(CardioError::InvalidData(format!(
                "row has {} columns, scaler was fitted on {}",
                row.len(),
                self.means.len()
            )));
        }
        Ok(row
            .iter()
            .zip(self.means.iter().zip(self.std_devs.iter()))
            .map(|(&x, (&m, &s))| (x - m) / s)
            .collect())
    }

    /// Standardize a whole split of rows.
    pub fn transform_matrix(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        rows.iter().map(|row| self.transform(row)).collect()
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<Vec<f64>> {
        vec![
            vec![1.0, 100.0, 0.0],
            vec![2.0, 200.0, 1.0],
            vec![3.0, 300.0, 0.0],
            vec![4.0, 400.0, 1.0],
        ]
    }

    #[test]
    fn test_fitted_columns_have_zero_mean_unit_variance() {
        let rows = sample_rows();
        let mut scaler = StandardScaler::new();
        scaler.fit(&rows).unwrap();
        let scaled = scaler.transform_matrix(&rows).unwrap();

        let n = scaled.len() as f64;
        for col in 0..3 {
            let mean: f64 = scaled.iter().map(|r| r[col]).sum::<f64>() / n;
            let var: f64 = scaled.iter().map(|r| (r[col] - mean).powi(2)).sum::<f64>() / n;
            assert!(mean.abs() < 1e-10, "column {} mean {}", col, mean);
            assert!((var - 1.0).abs() < 1e-10, "column {} variance {}", col, var);
        }
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let scaler = StandardScaler::new();
        assert!(matches!(
            scaler.transform(&[1.0, 2.0]),
            Err(CardioError::NotFitted)
        ));
    }

    #[test]
    fn test_width_mismatch_rejected() {
        let mut scaler = StandardScaler::new();
        scaler.fit(&sample_rows()).unwrap();
        assert!(scaler.transform(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let mut scaler = StandardScaler::new();
        let rows = vec![vec![1.0, 2.0], vec![1.0]];
        assert!(scaler.fit(&rows).is_err());
    }

    #[test]
    fn test_degenerate_column_stays_finite() {
        let rows = vec![vec![5.0, 1.0], vec![5.0, 2.0], vec![5.0, 3.0]];
        let mut scaler = StandardScaler::new();
        scaler.fit(&rows).unwrap();
        let scaled = scaler.transform(&[5.0, 2.0]).unwrap();
        assert!(scaled[0].is_finite());
        assert!(scaled[0].abs() < 1e-6);
    }

    #[test]
    fn test_serde_round_trip_reproduces_transform() {
        let rows = sample_rows();
        let mut scaler = StandardScaler::new();
        scaler.fit(&rows).unwrap();

        let json = serde_json::to_string(&scaler).unwrap();
        let restored: StandardScaler = serde_json::from_str(&json).unwrap();

        let probe = vec![2.5, 250.0, 1.0];
        assert_eq!(
            scaler.transform(&probe).unwrap(),
            restored.transform(&probe).unwrap()
        );
    }
}
