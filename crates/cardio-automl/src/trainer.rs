//! Training pipeline: load, split, scale, fit candidates, select, persist.

use std::path::PathBuf;

use cardio_core::prelude::*;
use cardio_core::utils::metrics::accuracy;
use cardio_data::{Dataset, DatasetError};
use thiserror::Error;
use tracing::info;

use crate::artifacts::{ArtifactError, ArtifactStore};
use crate::registry::{select_best, CandidateKind, TrainedClassifier};

/// Errors that abort a training run.
///
/// Training fails fast: any error here means no artifact was written or
/// overwritten in this run.
#[derive(Error, Debug)]
pub enum TrainError {
    /// Dataset could not be loaded or is structurally invalid
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// A candidate failed to fit or score
    #[error(transparent)]
    Model(#[from] CardioError),

    /// Artifacts could not be persisted
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// Result type for training operations
pub type Result<T> = std::result::Result<T, TrainError>;

/// Training run configuration.
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    /// Path of the labeled CSV dataset
    pub data_path: PathBuf,
    /// Directory that receives the scaler and model artifacts
    pub artifact_dir: PathBuf,
    /// Evaluation fraction of the split
    pub test_ratio: f64,
    /// Seed for the split shuffle and any sampling candidates
    pub seed: u64,
}

impl TrainerConfig {
    /// Config with the standard 80/20 split and seed 42
    pub fn new(data_path: PathBuf, artifact_dir: PathBuf) -> Self {
        Self {
            data_path,
            artifact_dir,
            test_ratio: 0.2,
            seed: 42,
        }
    }

    /// Set the evaluation fraction
    pub fn with_test_ratio(mut self, test_ratio: f64) -> Self {
        self.test_ratio = test_ratio;
        self
    }

    /// Set the split/sampling seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Outcome of one training run.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    /// The selected candidate
    pub best: CandidateKind,
    /// Its held-out accuracy
    pub best_accuracy: f64,
    /// Held-out accuracy of every candidate, in registry order
    pub scores: Vec<(CandidateKind, f64)>,
}

/// Runs the offline training pipeline.
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    /// Create a trainer for the given configuration
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline and persist the winning model and scaler.
    ///
    /// Steps: load CSV, impute missing values with whole-dataset column
    /// means, validate, seeded shuffle split, fit the scaler on the
    /// training split only, fit and score every registry candidate on
    /// the held-out split, select the strictly best (ties keep registry
    /// order), persist both artifacts. Any failure aborts before the
    /// persist step, so a failed run never leaves partial artifacts.
    pub fn train(&self) -> Result<TrainingReport> {
        info!("loading dataset from {}", self.config.data_path.display());
        let mut dataset = Dataset::from_csv(&self.config.data_path)?;
        dataset.impute_missing();
        dataset.validate()?;

        let (train, eval) = dataset.train_test_split(self.config.test_ratio, self.config.seed);
        info!(
            "split {} rows into {} train / {} eval (positive rate {:.3} / {:.3})",
            dataset.len(),
            train.len(),
            eval.len(),
            train.label_balance(),
            eval.label_balance()
        );

        let mut scaler = StandardScaler::new();
        scaler.fit(train.features())?;
        let train_x = scaler.transform_matrix(train.features())?;
        let eval_x = scaler.transform_matrix(eval.features())?;

        let mut fitted = Vec::new();
        let mut scores = Vec::new();
        for kind in CandidateKind::registry() {
            // The forest is the only sampling candidate; tie its seed to
            // the run seed so the whole run is reproducible.
            let mut model = match kind {
                CandidateKind::RandomForest => {
                    TrainedClassifier::RandomForest(RandomForest::new().with_seed(self.config.seed))
                }
                other => other.build(),
            };
            model.fit(&train_x, train.labels())?;

            let predicted: Vec<u8> = eval_x
                .iter()
                .map(|row| model.predict(row))
                .collect::<cardio_core::Result<_>>()?;
            let acc = accuracy(eval.labels(), &predicted);
            info!("{}: {:.4} accuracy", kind, acc);

            fitted.push(model);
            scores.push((kind, acc));
        }

        // Registry is non-empty, so selection always succeeds.
        let best_idx = select_best(&scores).expect("registry is never empty");
        let (best, best_accuracy) = scores[best_idx];
        info!("best model: {} with {:.4} accuracy", best, best_accuracy);

        let store = ArtifactStore::new(&self.config.artifact_dir);
        store.save_model(&fitted[best_idx])?;
        store.save_scaler(&scaler)?;
        info!("saved model and scaler artifacts to {}", store.dir().display());

        Ok(TrainingReport {
            best,
            best_accuracy,
            scores,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // 60 rows, clean threshold rule on the first feature.
    fn write_dataset(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("heart.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "age,sex,cp,trestbps,chol,fbs,restecg,thalach,exang,oldpeak,slope,ca,thal,target"
        )
        .unwrap();
        for i in 0..60 {
            let age = 30 + i;
            let target = u8::from(age > 59);
            writeln!(
                file,
                "{},{},{},{},{},0,1,{},0,{:.1},1,{},2,{}",
                age,
                i % 2,
                i % 4,
                110 + (i % 40),
                190 + i,
                150 + (i % 30),
                (i % 5) as f64 * 0.5,
                i % 4,
                target
            )
            .unwrap();
        }
        path
    }

    #[test]
    fn test_train_writes_artifacts_and_reports_scores() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = write_dataset(dir.path());
        let artifact_dir = dir.path().join("artifacts");

        let config = TrainerConfig::new(data_path, artifact_dir.clone());
        let report = Trainer::new(config).train().unwrap();

        assert_eq!(report.scores.len(), 3);
        assert!(report.best_accuracy > 0.5);
        assert!(ArtifactStore::new(&artifact_dir).is_trained());
    }

    #[test]
    fn test_missing_dataset_writes_no_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let artifact_dir = dir.path().join("artifacts");

        let config = TrainerConfig::new(dir.path().join("absent.csv"), artifact_dir.clone());
        let err = Trainer::new(config).train().unwrap_err();

        assert!(matches!(
            err,
            TrainError::Dataset(DatasetError::FileNotFound(_))
        ));
        assert!(!ArtifactStore::new(&artifact_dir).is_trained());
    }

    #[test]
    fn test_single_class_dataset_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heart.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "age,sex,cp,trestbps,chol,fbs,restecg,thalach,exang,oldpeak,slope,ca,thal,target"
        )
        .unwrap();
        for i in 0..10 {
            writeln!(file, "{},1,0,120,200,0,0,150,0,1.0,1,0,2,1", 40 + i).unwrap();
        }

        let config = TrainerConfig::new(path, dir.path().join("artifacts"));
        let err = Trainer::new(config).train().unwrap_err();
        assert!(matches!(
            err,
            TrainError::Dataset(DatasetError::SingleClass)
        ));
    }

    #[test]
    fn test_training_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = write_dataset(dir.path());

        let artifacts_a = dir.path().join("a");
        let artifacts_b = dir.path().join("b");

        let report_a = Trainer::new(TrainerConfig::new(data_path.clone(), artifacts_a.clone()))
            .train()
            .unwrap();
        let report_b = Trainer::new(TrainerConfig::new(data_path, artifacts_b.clone()))
            .train()
            .unwrap();

        assert_eq!(report_a.best, report_b.best);
        assert_eq!(report_a.scores, report_b.scores);

        let scaler_a = ArtifactStore::new(&artifacts_a).load_scaler().unwrap();
        let scaler_b = ArtifactStore::new(&artifacts_b).load_scaler().unwrap();
        assert_eq!(scaler_a.means(), scaler_b.means());
        assert_eq!(scaler_a.std_devs(), scaler_b.std_devs());
    }
}
