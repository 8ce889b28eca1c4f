//! Persisted training artifacts.
//!
//! A training run produces two independent artifacts: the fitted scaler
//! and the winning classifier. The [`ArtifactStore`] is an explicit
//! handle over their directory, constructed once at process start and
//! passed by reference wherever loading or saving happens; there is no
//! process-global artifact state.

use std::fs;
use std::path::{Path, PathBuf};

use cardio_core::scaler::StandardScaler;
use thiserror::Error;

use crate::registry::TrainedClassifier;

const MODEL_FILE: &str = "model.json";
const SCALER_FILE: &str = "scaler.json";

/// Errors raised while persisting or loading artifacts.
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// Artifact file does not exist (model has not been trained yet)
    #[error("Artifact not found: {0}")]
    Missing(PathBuf),

    /// Underlying I/O failure
    #[error("Artifact I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact file exists but does not deserialize
    #[error("Corrupt artifact {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Result type for artifact operations
pub type Result<T> = std::result::Result<T, ArtifactError>;

/// Directory-backed store for the scaler and model artifacts.
///
/// Saving overwrites any previous artifact in place; there is no
/// versioning. Loading a saved artifact reproduces the exact in-process
/// transform and prediction behavior.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store over the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the artifacts
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the model artifact
    pub fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    /// Path of the scaler artifact
    pub fn scaler_path(&self) -> PathBuf {
        self.dir.join(SCALER_FILE)
    }

    /// Whether both artifacts are present
    pub fn is_trained(&self) -> bool {
        self.model_path().exists() && self.scaler_path().exists()
    }

    /// Persist the winning classifier, overwriting any previous one
    pub fn save_model(&self, model: &TrainedClassifier) -> Result<()> {
        self.save(&self.model_path(), model)
    }

    /// Persist the fitted scaler, overwriting any previous one
    pub fn save_scaler(&self, scaler: &StandardScaler) -> Result<()> {
        self.save(&self.scaler_path(), scaler)
    }

    /// Load the persisted classifier
    pub fn load_model(&self) -> Result<TrainedClassifier> {
        self.load(&self.model_path())
    }

    /// Load the persisted scaler
    pub fn load_scaler(&self) -> Result<StandardScaler> {
        self.load(&self.scaler_path())
    }

    fn save<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(value).map_err(|source| ArtifactError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    fn load<T: serde::de::DeserializeOwned>(&self, path: &Path) -> Result<T> {
        if !path.exists() {
            return Err(ArtifactError::Missing(path.to_path_buf()));
        }
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|source| ArtifactError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CandidateKind;
    use cardio_core::prelude::*;

    #[test]
    fn test_scaler_round_trip_reproduces_transform() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());

        let rows = vec![vec![1.0, 10.0], vec![2.0, 20.0], vec![3.0, 30.0]];
        let mut scaler = StandardScaler::new();
        scaler.fit(&rows).unwrap();

        store.save_scaler(&scaler).unwrap();
        let restored = store.load_scaler().unwrap();

        let probe = vec![1.5, 25.0];
        assert_eq!(
            scaler.transform(&probe).unwrap(),
            restored.transform(&probe).unwrap()
        );
    }

    #[test]
    fn test_model_round_trip_reproduces_prediction() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());

        let x = vec![vec![-1.0], vec![-0.5], vec![0.5], vec![1.0]];
        let y = vec![0, 0, 1, 1];
        let mut model = CandidateKind::GradientBoosting.build();
        model.fit(&x, &y).unwrap();

        store.save_model(&model).unwrap();
        let restored = store.load_model().unwrap();

        assert_eq!(restored.kind(), CandidateKind::GradientBoosting);
        assert_eq!(
            model.predict_probability(&[0.8]).unwrap(),
            restored.predict_probability(&[0.8]).unwrap()
        );
    }

    #[test]
    fn test_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());

        assert!(!store.is_trained());
        assert!(matches!(store.load_model(), Err(ArtifactError::Missing(_))));
        assert!(matches!(store.load_scaler(), Err(ArtifactError::Missing(_))));
    }

    #[test]
    fn test_corrupt_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        std::fs::write(store.model_path(), "not json").unwrap();

        assert!(matches!(
            store.load_model(),
            Err(ArtifactError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());

        let rows_a = vec![vec![1.0], vec![2.0], vec![3.0]];
        let rows_b = vec![vec![10.0], vec![20.0], vec![30.0]];

        let mut scaler = StandardScaler::new();
        scaler.fit(&rows_a).unwrap();
        store.save_scaler(&scaler).unwrap();

        let mut scaler = StandardScaler::new();
        scaler.fit(&rows_b).unwrap();
        store.save_scaler(&scaler).unwrap();

        let restored = store.load_scaler().unwrap();
        assert_eq!(restored.means(), &[20.0]);
    }
}
