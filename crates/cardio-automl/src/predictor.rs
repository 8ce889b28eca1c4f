//! Artifact-backed inference for one patient at a time.

use cardio_core::prelude::*;
use cardio_core::scaler::StandardScaler;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::artifacts::{ArtifactError, ArtifactStore};
use crate::registry::TrainedClassifier;

/// Errors raised while serving one prediction.
///
/// Serving errors are local to the request: they never mutate the loaded
/// artifacts, so subsequent requests are unaffected.
#[derive(Error, Debug)]
pub enum PredictError {
    /// Scaler or model artifact is missing or corrupt. Callers should
    /// degrade to a "train the model first" message, not crash.
    #[error("Model artifacts unavailable: {0}")]
    ArtifactsUnavailable(#[from] ArtifactError),

    /// The input vector failed validation or the model rejected it
    #[error(transparent)]
    Invalid(#[from] CardioError),
}

/// Result type for prediction operations
pub type Result<T> = std::result::Result<T, PredictError>;

/// One prediction outcome: the class label and the positive-class
/// probability.
///
/// Ephemeral, produced per call. The probability is always in [0, 1];
/// percentage formatting belongs to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Predicted class: 1 = heart disease likely, 0 = unlikely
    pub label: u8,
    /// Probability of the positive class
    pub probability: f64,
}

impl RiskAssessment {
    /// Whether the predicted label is the positive class
    pub fn is_high_risk(&self) -> bool {
        self.label == 1
    }
}

/// Serves predictions from the persisted scaler and model.
///
/// Both artifacts are loaded once at construction; the predictor is then
/// immutable and can serve any number of requests (and, being read-only,
/// is safe to share across threads). Construct it once per process from
/// the same [`ArtifactStore`] handle the trainer writes to.
///
/// # Example
///
/// ```rust,no_run
/// use cardio_automl::{ArtifactStore, RiskPredictor};
/// # fn patient() -> cardio_core::features::FeatureVector { unimplemented!() }
///
/// let store = ArtifactStore::new("artifacts");
/// let predictor = RiskPredictor::from_store(&store).unwrap();
/// let assessment = predictor.predict(&patient()).unwrap();
/// assert!(assessment.probability >= 0.0 && assessment.probability <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct RiskPredictor {
    scaler: StandardScaler,
    model: TrainedClassifier,
}

impl RiskPredictor {
    /// Load both artifacts from the store.
    ///
    /// A missing or corrupt artifact surfaces as
    /// [`PredictError::ArtifactsUnavailable`] so the caller can report
    /// that training has not run instead of failing opaquely.
    pub fn from_store(store: &ArtifactStore) -> Result<Self> {
        let scaler = store.load_scaler()?;
        let model = store.load_model()?;
        Ok(Self { scaler, model })
    }

    /// The kind of classifier being served
    pub fn model_kind(&self) -> crate::registry::CandidateKind {
        self.model.kind()
    }

    /// Predict the risk label and probability for one patient.
    ///
    /// Validates and encodes the vector, applies the frozen scaler, and
    /// queries the model. Pure and synchronous; calling twice with the
    /// same input yields the identical assessment.
    pub fn predict(&self, patient: &FeatureVector) -> Result<RiskAssessment> {
        let row = patient.encode()?;
        let scaled = self.scaler.transform(&row)?;
        let label = self.model.predict(&scaled)?;
        let probability = self.model.predict_probability(&scaled)?;
        Ok(RiskAssessment { label, probability })
    }
}
