//! Candidate model registry and selection.
//!
//! The set of classifier types compared per training run is a closed
//! enum: adding a candidate means adding a variant, which keeps the
//! registry order (and therefore tie-breaking) explicit and deterministic.

use cardio_core::prelude::*;
use serde::{Deserialize, Serialize};

/// A candidate classifier type in the fixed registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateKind {
    Logistic,
    RandomForest,
    GradientBoosting,
}

impl CandidateKind {
    /// The fixed registry, in evaluation order. Selection ties resolve to
    /// the earliest entry.
    pub fn registry() -> [CandidateKind; 3] {
        [
            CandidateKind::Logistic,
            CandidateKind::RandomForest,
            CandidateKind::GradientBoosting,
        ]
    }

    /// Construct an unfitted classifier of this kind with its default
    /// hyperparameters.
    pub fn build(self) -> TrainedClassifier {
        match self {
            CandidateKind::Logistic => TrainedClassifier::Logistic(LogisticRegression::new()),
            CandidateKind::RandomForest => TrainedClassifier::RandomForest(RandomForest::new()),
            CandidateKind::GradientBoosting => {
                TrainedClassifier::GradientBoosting(GradientBoosting::new())
            }
        }
    }
}

impl std::fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateKind::Logistic => write!(f, "Logistic Regression"),
            CandidateKind::RandomForest => write!(f, "Random Forest"),
            CandidateKind::GradientBoosting => write!(f, "Gradient Boosting"),
        }
    }
}

/// A classifier of any registry kind. This is the persisted model
/// artifact: serde's adjacent tagging records which variant was trained.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "model")]
pub enum TrainedClassifier {
    Logistic(LogisticRegression),
    RandomForest(RandomForest),
    GradientBoosting(GradientBoosting),
}

impl TrainedClassifier {
    /// Which registry kind this classifier is
    pub fn kind(&self) -> CandidateKind {
        match self {
            TrainedClassifier::Logistic(_) => CandidateKind::Logistic,
            TrainedClassifier::RandomForest(_) => CandidateKind::RandomForest,
            TrainedClassifier::GradientBoosting(_) => CandidateKind::GradientBoosting,
        }
    }
}

impl Classifier for TrainedClassifier {
    fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) -> cardio_core::Result<()> {
        match self {
            TrainedClassifier::Logistic(m) => m.fit(x, y),
            TrainedClassifier::RandomForest(m) => m.fit(x, y),
            TrainedClassifier::GradientBoosting(m) => m.fit(x, y),
        }
    }

    fn predict(&self, row: &[f64]) -> cardio_core::Result<u8> {
        match self {
            TrainedClassifier::Logistic(m) => m.predict(row),
            TrainedClassifier::RandomForest(m) => m.predict(row),
            TrainedClassifier::GradientBoosting(m) => m.predict(row),
        }
    }

    fn predict_probability(&self, row: &[f64]) -> cardio_core::Result<f64> {
        match self {
            TrainedClassifier::Logistic(m) => m.predict_probability(row),
            TrainedClassifier::RandomForest(m) => m.predict_probability(row),
            TrainedClassifier::GradientBoosting(m) => m.predict_probability(row),
        }
    }

    fn is_fitted(&self) -> bool {
        match self {
            TrainedClassifier::Logistic(m) => m.is_fitted(),
            TrainedClassifier::RandomForest(m) => m.is_fitted(),
            TrainedClassifier::GradientBoosting(m) => m.is_fitted(),
        }
    }
}

/// Index of the best-scoring candidate under strictly-greater comparison.
///
/// Iterates in slice order, so equal scores keep the earliest candidate;
/// the tie-break is deterministic by construction. Returns None for an
/// empty slice.
pub fn select_best(scores: &[(CandidateKind, f64)]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, (_, score)) in scores.iter().enumerate() {
        match best {
            Some(b) if *score <= scores[b].1 => {}
            _ => best = Some(i),
        }
    }
    best
}
