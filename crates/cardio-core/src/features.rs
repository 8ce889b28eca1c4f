//! Patient feature vector and categorical encoding.
//!
//! Training data and live inference must agree on the exact column order
//! and on the integer codes used for every categorical measurement. This
//! module is the single owner of that contract: the dataset loader keys
//! its columns off [`FEATURE_NAMES`], and [`FeatureVector::encode`]
//! produces rows in the same order with the same codes.

use serde::{Deserialize, Serialize};

use crate::error::{CardioError, Result};

/// Number of input features consumed by every classifier.
pub const N_FEATURES: usize = 13;

/// Feature column names, in the pinned order used by the training data.
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal",
];

/// Patient sex. Encoded 0 = female, 1 = male.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    /// Integer code used in the training data
    pub fn code(self) -> f64 {
        match self {
            Sex::Female => 0.0,
            Sex::Male => 1.0,
        }
    }
}

/// Chest pain type. Encoded 0..=3 in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChestPainType {
    TypicalAngina,
    AtypicalAngina,
    NonAnginalPain,
    Asymptomatic,
}

impl ChestPainType {
    /// Integer code used in the training data
    pub fn code(self) -> f64 {
        match self {
            ChestPainType::TypicalAngina => 0.0,
            ChestPainType::AtypicalAngina => 1.0,
            ChestPainType::NonAnginalPain => 2.0,
            ChestPainType::Asymptomatic => 3.0,
        }
    }
}

/// Resting electrocardiogram result. Encoded 0..=2 in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestingEcg {
    Normal,
    SttWaveAbnormality,
    LeftVentricularHypertrophy,
}

impl RestingEcg {
    /// Integer code used in the training data
    pub fn code(self) -> f64 {
        match self {
            RestingEcg::Normal => 0.0,
            RestingEcg::SttWaveAbnormality => 1.0,
            RestingEcg::LeftVentricularHypertrophy => 2.0,
        }
    }
}

/// Slope of the peak-exercise ST segment. Encoded 0..=2 in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StSlope {
    Upsloping,
    Flat,
    Downsloping,
}

impl StSlope {
    /// Integer code used in the training data
    pub fn code(self) -> f64 {
        match self {
            StSlope::Upsloping => 0.0,
            StSlope::Flat => 1.0,
            StSlope::Downsloping => 2.0,
        }
    }
}

/// Thalassemia test result.
///
/// Unlike every other categorical column, `thal` is encoded 1..=3: the
/// training datasets in circulation use a 1-based convention for this one
/// column, and the codes here are pinned to match them. Do not re-derive
/// these from the variant order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Thalassemia {
    Normal,
    FixedDefect,
    ReversibleDefect,
}

impl Thalassemia {
    /// Integer code used in the training data (1-based)
    pub fn code(self) -> f64 {
        match self {
            Thalassemia::Normal => 1.0,
            Thalassemia::FixedDefect => 2.0,
            Thalassemia::ReversibleDefect => 3.0,
        }
    }
}

/// One patient's clinical measurements, in typed form.
///
/// Categorical measurements are enums carrying their pinned integer codes;
/// numeric measurements are validated against the declared input ranges by
/// [`FeatureVector::validate`] before any encoding happens. Out-of-range
/// values are rejected rather than clamped, since classifier behavior on
/// out-of-distribution inputs is undefined.
///
/// # Example
///
/// ```rust
/// use cardio_core::features::*;
///
/// let patient = FeatureVector {
///     age: 57,
///     sex: Sex::Male,
///     chest_pain: ChestPainType::Asymptomatic,
///     resting_bp: 140,
///     cholesterol: 260,
///     high_fasting_sugar: false,
///     resting_ecg: RestingEcg::Normal,
///     max_heart_rate: 150,
///     exercise_angina: true,
///     st_depression: 1.4,
///     st_slope: StSlope::Flat,
///     major_vessels: 1,
///     thalassemia: Thalassemia::ReversibleDefect,
/// };
/// let row = patient.encode().unwrap();
/// assert_eq!(row.len(), 13);
/// assert_eq!(row[0], 57.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Age in years (1..=120)
    pub age: u32,
    /// Patient sex
    pub sex: Sex,
    /// Chest pain type
    pub chest_pain: ChestPainType,
    /// Resting blood pressure in mm Hg (50..=250)
    pub resting_bp: u32,
    /// Serum cholesterol in mg/dl (100..=600)
    pub cholesterol: u32,
    /// Fasting blood sugar above 120 mg/dl
    pub high_fasting_sugar: bool,
    /// Resting electrocardiogram result
    pub resting_ecg: RestingEcg,
    /// Maximum heart rate achieved (50..=250)
    pub max_heart_rate: u32,
    /// Exercise-induced angina
    pub exercise_angina: bool,
    /// ST depression induced by exercise relative to rest (0.0..=10.0)
    pub st_depression: f64,
    /// Slope of the peak-exercise ST segment
    pub st_slope: StSlope,
    /// Number of major vessels colored by fluoroscopy (0..=3)
    pub major_vessels: u8,
    /// Thalassemia test result
    pub thalassemia: Thalassemia,
}

fn check_range<T: PartialOrd + std::fmt::Display + Copy>(
    name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CardioError::InvalidParameter {
            name: name.to_string(),
            reason: format!("must be between {} and {}, got {}", min, max, value),
        });
    }
    Ok(())
}

impl FeatureVector {
    /// Validate every numeric field against its declared input range.
    pub fn validate(&self) -> Result<()> {
        check_range("age", self.age, 1, 120)?;
        check_range("trestbps", self.resting_bp, 50, 250)?;
        check_range("chol", self.cholesterol, 100, 600)?;
        check_range("thalach", self.max_heart_rate, 50, 250)?;
        if !self.st_depression.is_finite() {
            return Err(CardioError::InvalidParameter {
                name: "oldpeak".to_string(),
                reason: "must be a finite number".to_string(),
            });
        }
        check_range("oldpeak", self.st_depression, 0.0, 10.0)?;
        check_range("ca", self.major_vessels, 0, 3)?;
        Ok(())
    }

    /// Encode into the numeric row consumed by the scaler and classifiers.
    ///
    /// Validates first, then emits the 13 values in [`FEATURE_NAMES`]
    /// order with the pinned categorical codes. Pure.
    pub fn encode(&self) -> Result<[f64; N_FEATURES]> {
        self.validate()?;
        Ok([
            self.age as f64,
            self.sex.code(),
            self.chest_pain.code(),
            self.resting_bp as f64,
            self.cholesterol as f64,
            if self.high_fasting_sugar { 1.0 } else { 0.0 },
            self.resting_ecg.code(),
            self.max_heart_rate as f64,
            if self.exercise_angina { 1.0 } else { 0.0 },
            self.st_depression,
            self.st_slope.code(),
            self.major_vessels as f64,
            self.thalassemia.code(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_patient() -> FeatureVector {
        FeatureVector {
            age: 57,
            sex: Sex::Male,
            chest_pain: ChestPainType::AtypicalAngina,
            resting_bp: 130,
            cholesterol: 236,
            high_fasting_sugar: false,
            resting_ecg: RestingEcg::SttWaveAbnormality,
            max_heart_rate: 174,
            exercise_angina: false,
            st_depression: 0.0,
            st_slope: StSlope::Flat,
            major_vessels: 1,
            thalassemia: Thalassemia::Normal,
        }
    }

    #[test]
    fn test_encode_order_and_codes() {
        let row = sample_patient().encode().unwrap();
        assert_eq!(
            row,
            [57.0, 1.0, 1.0, 130.0, 236.0, 0.0, 1.0, 174.0, 0.0, 0.0, 1.0, 1.0, 1.0]
        );
    }

    #[test]
    fn test_thal_codes_are_one_based() {
        assert_eq!(Thalassemia::Normal.code(), 1.0);
        assert_eq!(Thalassemia::FixedDefect.code(), 2.0);
        assert_eq!(Thalassemia::ReversibleDefect.code(), 3.0);
    }

    #[test]
    fn test_other_categoricals_are_zero_based() {
        assert_eq!(Sex::Female.code(), 0.0);
        assert_eq!(ChestPainType::TypicalAngina.code(), 0.0);
        assert_eq!(RestingEcg::Normal.code(), 0.0);
        assert_eq!(StSlope::Upsloping.code(), 0.0);
    }

    #[test]
    fn test_out_of_range_age_rejected() {
        let mut patient = sample_patient();
        patient.age = 0;
        let err = patient.encode().unwrap_err();
        assert!(err.to_string().contains("age"));

        patient.age = 121;
        assert!(patient.encode().is_err());
    }

    #[test]
    fn test_out_of_range_oldpeak_rejected() {
        let mut patient = sample_patient();
        patient.st_depression = -0.5;
        assert!(patient.encode().is_err());

        patient.st_depression = f64::NAN;
        assert!(patient.encode().is_err());
    }

    #[test]
    fn test_minimum_values_accepted() {
        let patient = FeatureVector {
            age: 1,
            sex: Sex::Female,
            chest_pain: ChestPainType::TypicalAngina,
            resting_bp: 50,
            cholesterol: 100,
            high_fasting_sugar: false,
            resting_ecg: RestingEcg::Normal,
            max_heart_rate: 50,
            exercise_angina: false,
            st_depression: 0.0,
            st_slope: StSlope::Upsloping,
            major_vessels: 0,
            thalassemia: Thalassemia::Normal,
        };
        assert!(patient.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let patient = sample_patient();
        let json = serde_json::to_string(&patient).unwrap();
        let back: FeatureVector = serde_json::from_str(&json).unwrap();
        assert_eq!(patient, back);
    }

    #[test]
    fn test_feature_names_width() {
        assert_eq!(FEATURE_NAMES.len(), N_FEATURES);
    }
}
