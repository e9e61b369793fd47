use crate::error::ApiError;
use crate::models::{RiskPrediction, StudentInfo};
use crate::validation;

/// Score returned until a trained model is wired in.
pub const MOCK_RISK_SCORE: f64 = 0.85;

pub const HIGH_RISK_THRESHOLD: f64 = 0.7;
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.5;

/// Produces a risk score for an already validated student.
///
/// Implementations only see input that passed `validation::validate_student`.
/// The pipeline re-checks their output, so a model may return any `f64`.
pub trait RiskPredictor: Send + Sync {
    fn predict(&self, student: &StudentInfo) -> Result<f64, ApiError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MockRiskPredictor;

impl RiskPredictor for MockRiskPredictor {
    fn predict(&self, _student: &StudentInfo) -> Result<f64, ApiError> {
        Ok(MOCK_RISK_SCORE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    High,
    Medium,
    Low,
}

impl RiskTier {
    /// Lower bounds are inclusive; `High` is open-ended above 0.7.
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_RISK_THRESHOLD {
            RiskTier::High
        } else if score >= MEDIUM_RISK_THRESHOLD {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}

pub fn predict_risk(
    predictor: &dyn RiskPredictor,
    student: StudentInfo,
) -> Result<RiskPrediction, ApiError> {
    let student = validation::validate_student(student)?;
    tracing::info!(student = %student.name, "risk prediction requested");

    let risk_score = predictor.predict(&student)?;
    if !validation::unit_interval(risk_score) {
        return Err(ApiError::internal(format!(
            "predicted risk score {risk_score} is out of range"
        )));
    }

    Ok(RiskPrediction { risk_score })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPredictor(f64);

    impl RiskPredictor for FixedPredictor {
        fn predict(&self, _student: &StudentInfo) -> Result<f64, ApiError> {
            Ok(self.0)
        }
    }

    fn sample_student() -> StudentInfo {
        StudentInfo {
            name: "Alex Johnson".to_string(),
            attendance: 0.75,
            scores: vec![85.0, 90.0, 78.0, 82.0],
        }
    }

    #[test]
    fn mock_predictor_returns_fixed_score() {
        let prediction = predict_risk(&MockRiskPredictor, sample_student()).unwrap();
        assert_eq!(prediction.risk_score, 0.85);
    }

    #[test]
    fn invalid_student_never_reaches_predictor() {
        let mut student = sample_student();
        student.scores = vec![150.0];
        let err = predict_risk(&FixedPredictor(0.2), student).unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref reason) if reason == "Scores must be between 0 and 100"));
    }

    #[test]
    fn out_of_range_prediction_is_internal() {
        for score in [1.2, -0.01, f64::NAN] {
            let err = predict_risk(&FixedPredictor(score), sample_student()).unwrap_err();
            assert!(matches!(err, ApiError::Internal(_)));
        }
    }

    #[test]
    fn tiers_follow_thresholds() {
        assert_eq!(RiskTier::from_score(1.0), RiskTier::High);
        assert_eq!(RiskTier::from_score(0.7), RiskTier::High);
        assert_eq!(RiskTier::from_score(0.69999), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(0.5), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(0.49999), RiskTier::Low);
        assert_eq!(RiskTier::from_score(0.0), RiskTier::Low);
    }
}
