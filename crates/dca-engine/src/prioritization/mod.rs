//! Classifier-backed prioritization for the model schema.
//!
//! A trained [`RecoveryClassifier`] supplies the recovery probability; priority is a
//! linear blend of that probability with normalised amount, age and escalation history.

mod artifact;
mod classifier;
mod encoder;

pub use artifact::{ModelArtifact, ModelArtifactError};
pub use classifier::{
    FeatureVector, LogisticRegression, RecoveryClassifier, FEATURE_COUNT, FEATURE_NAMES,
};
pub use encoder::CategoryEncoder;

use crate::cases::ModelCase;
use crate::error::ScoringError;
use crate::numeric::round_to;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

const PROBABILITY_WEIGHT: f64 = 0.4;
const AMOUNT_WEIGHT: f64 = 0.3;
const AMOUNT_SCALE: f64 = 500_000.0;
const AGE_WEIGHT: f64 = 0.2;
const AGE_SCALE_DAYS: f64 = 365.0;
const ESCALATION_WEIGHT: f64 = 0.1;
const ESCALATION_SCALE: f64 = 3.0;

/// Column names written back to a case table by a model-assisted pass.
pub const DERIVED_COLUMNS: [&str; 4] = [
    "recovery_probability",
    "priority_score",
    "confidence_level",
    "recommended_dca",
];

/// Maturity of the case history behind a prediction, not model certainty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

/// Collection agency tier a case should be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DcaTier {
    TopPerforming,
    MidTier,
    LowCost,
}

impl DcaTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::TopPerforming => "Top Performing DCA",
            Self::MidTier => "Mid Tier DCA",
            Self::LowCost => "Low Cost DCA",
        }
    }
}

/// Weighted priority, rounded to 2 decimals.
///
/// Amount, age and escalations are divided by their reference scales but not clamped,
/// so extreme cases can exceed 1.0 and float to the top of the ranking.
pub fn calculate_priority(case: &ModelCase, recovery_probability: f64) -> f64 {
    let amount = case.overdue_amount / AMOUNT_SCALE;
    let age = case.days_overdue as f64 / AGE_SCALE_DAYS;
    let escalations = case.previous_escalations as f64 / ESCALATION_SCALE;

    round_to(
        PROBABILITY_WEIGHT * recovery_probability + AMOUNT_WEIGHT * amount + AGE_WEIGHT * age
            - ESCALATION_WEIGHT * escalations,
        2,
    )
}

pub fn confidence_level(days_overdue: u32) -> ConfidenceLevel {
    match days_overdue {
        days if days < 30 => ConfidenceLevel::Low,
        days if days < 90 => ConfidenceLevel::Medium,
        _ => ConfidenceLevel::High,
    }
}

pub fn recommend_dca(priority_score: f64) -> DcaTier {
    if priority_score >= 0.75 {
        DcaTier::TopPerforming
    } else if priority_score >= 0.5 {
        DcaTier::MidTier
    } else {
        DcaTier::LowCost
    }
}

/// A model-schema case with its classifier-derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrioritizedCase {
    pub case: ModelCase,
    pub recovery_probability: f64,
    pub priority_score: f64,
    pub confidence_level: ConfidenceLevel,
    pub recommended_dca: DcaTier,
}

impl PrioritizedCase {
    /// Cell values in [`DERIVED_COLUMNS`] order.
    pub fn derived_cells(&self) -> Vec<String> {
        vec![
            self.recovery_probability.to_string(),
            self.priority_score.to_string(),
            self.confidence_level.label().to_string(),
            self.recommended_dca.label().to_string(),
        ]
    }
}

/// Engine holding a read-only classifier and its fitted encoders.
#[derive(Clone)]
pub struct ModelAssistedEngine {
    classifier: Arc<dyn RecoveryClassifier>,
    customer_type: CategoryEncoder,
    region: CategoryEncoder,
}

impl std::fmt::Debug for ModelAssistedEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelAssistedEngine")
            .field("customer_type", &self.customer_type)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl ModelAssistedEngine {
    pub fn new(
        classifier: Arc<dyn RecoveryClassifier>,
        customer_type: CategoryEncoder,
        region: CategoryEncoder,
    ) -> Self {
        Self {
            classifier,
            customer_type,
            region,
        }
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        let ModelArtifact {
            classifier,
            customer_type,
            region,
        } = artifact;
        Self::new(Arc::new(classifier), customer_type, region)
    }

    pub fn features(&self, case: &ModelCase) -> Result<FeatureVector, ScoringError> {
        let customer_type = self.customer_type.encode(&case.customer_type)?;
        let region = self.region.encode(&case.region)?;
        Ok(FeatureVector::from_case(case, customer_type, region))
    }

    pub fn prioritize(&self, case: &ModelCase) -> Result<PrioritizedCase, ScoringError> {
        let features = self.features(case)?;
        let probability = self.classifier.predict_proba(&features).clamp(0.0, 1.0);
        let recovery_probability = round_to(probability, 2);
        let priority_score = calculate_priority(case, recovery_probability);

        Ok(PrioritizedCase {
            case: case.clone(),
            recovery_probability,
            priority_score,
            confidence_level: confidence_level(case.days_overdue),
            recommended_dca: recommend_dca(priority_score),
        })
    }

    /// All-or-nothing: the first unknown category aborts the batch.
    pub fn prioritize_all(&self, cases: &[ModelCase]) -> Result<Vec<PrioritizedCase>, ScoringError> {
        let prioritized = cases
            .iter()
            .map(|case| self.prioritize(case))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(cases = prioritized.len(), "model-assisted pass complete");
        Ok(prioritized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cases::CaseId;

    struct FixedClassifier(f64);

    impl RecoveryClassifier for FixedClassifier {
        fn predict_proba(&self, _features: &FeatureVector) -> f64 {
            self.0
        }
    }

    fn engine(probability: f64) -> ModelAssistedEngine {
        ModelAssistedEngine::new(
            Arc::new(FixedClassifier(probability)),
            CategoryEncoder::fit("customer_type", ["SME", "Enterprise"]),
            CategoryEncoder::fit("region", ["North", "South", "East", "West"]),
        )
    }

    fn model_case() -> ModelCase {
        ModelCase {
            case_id: CaseId::from("CASE_1000"),
            overdue_amount: 250_000.0,
            days_overdue: 73,
            customer_type: "SME".to_string(),
            region: "North".to_string(),
            past_recovery_rate: 0.8,
            dca_experience_score: 0.7,
            previous_escalations: 3,
        }
    }

    #[test]
    fn priority_blends_probability_with_normalised_history() {
        // 0.4*0.9 + 0.3*0.5 + 0.2*0.2 - 0.1*1.0
        assert_eq!(calculate_priority(&model_case(), 0.9), 0.45);
    }

    #[test]
    fn priority_is_not_clamped_for_extreme_cases() {
        let mut case = model_case();
        case.overdue_amount = 2_000_000.0;
        case.days_overdue = 730;
        case.previous_escalations = 0;

        assert_eq!(calculate_priority(&case, 1.0), 2.0);
    }

    #[test]
    fn confidence_reflects_case_maturity() {
        assert_eq!(confidence_level(29), ConfidenceLevel::Low);
        assert_eq!(confidence_level(30), ConfidenceLevel::Medium);
        assert_eq!(confidence_level(89), ConfidenceLevel::Medium);
        assert_eq!(confidence_level(90), ConfidenceLevel::High);
    }

    #[test]
    fn dca_tiers_use_inclusive_thresholds() {
        assert_eq!(recommend_dca(0.75), DcaTier::TopPerforming);
        assert_eq!(recommend_dca(0.74), DcaTier::MidTier);
        assert_eq!(recommend_dca(0.5), DcaTier::MidTier);
        assert_eq!(recommend_dca(0.49), DcaTier::LowCost);
        assert_eq!(DcaTier::TopPerforming.label(), "Top Performing DCA");
    }

    #[test]
    fn prioritize_rounds_probability_to_two_decimals() {
        let prioritized = engine(0.8765).prioritize(&model_case()).expect("known categories");

        assert_eq!(prioritized.recovery_probability, 0.88);
        assert_eq!(prioritized.priority_score, 0.44);
        assert_eq!(prioritized.confidence_level, ConfidenceLevel::Medium);
        assert_eq!(prioritized.recommended_dca, DcaTier::LowCost);
    }

    #[test]
    fn unknown_region_aborts_the_batch() {
        let mut stray = model_case();
        stray.case_id = CaseId::from("CASE_1001");
        stray.region = "Central".to_string();

        let error = engine(0.5)
            .prioritize_all(&[model_case(), stray])
            .expect_err("unknown region");
        assert_eq!(
            error,
            ScoringError::UnknownCategory {
                field: "region".to_string(),
                value: "Central".to_string(),
            }
        );
    }

    #[test]
    fn features_follow_training_column_order() {
        let features = engine(0.5).features(&model_case()).expect("known categories");
        // Enterprise=0, SME=1; East=0, North=1, South=2, West=3
        assert_eq!(
            features,
            FeatureVector([250_000.0, 73.0, 1.0, 1.0, 0.8, 0.7, 3.0])
        );
    }
}
