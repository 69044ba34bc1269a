use crate::cases::ModelCase;
use serde::{Deserialize, Serialize};

/// Feature order the classifier was trained with.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "overdue_amount",
    "days_overdue",
    "customer_type",
    "region",
    "past_recovery_rate",
    "dca_experience_score",
    "previous_escalations",
];

pub const FEATURE_COUNT: usize = 7;

/// Numeric input row for a classifier, in [`FEATURE_NAMES`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn from_case(case: &ModelCase, customer_type_code: u32, region_code: u32) -> Self {
        Self([
            case.overdue_amount,
            case.days_overdue as f64,
            customer_type_code as f64,
            region_code as f64,
            case.past_recovery_rate,
            case.dca_experience_score,
            case.previous_escalations as f64,
        ])
    }
}

/// Binary classifier estimating the probability that a case is eventually recovered.
///
/// Implementations are read-only once built and may be shared across threads.
pub trait RecoveryClassifier: Send + Sync {
    /// Positive-class probability in `[0, 1]`.
    fn predict_proba(&self, features: &FeatureVector) -> f64;
}

/// Logistic regression with one weight per feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub intercept: f64,
    pub coefficients: [f64; FEATURE_COUNT],
}

impl RecoveryClassifier for LogisticRegression {
    fn predict_proba(&self, features: &FeatureVector) -> f64 {
        let logit = self
            .coefficients
            .iter()
            .zip(features.0.iter())
            .fold(self.intercept, |acc, (weight, value)| acc + weight * value);
        1.0 / (1.0 + (-logit).exp())
    }
}
