use super::views::{CaseInsight, InsightLabel};
use crate::cases::Case;
use crate::scoring::HeuristicEngine;

/// First matching rule wins; the order matters for cases that satisfy several.
pub fn insight_label(recovery_probability: f64, churn_risk: f64) -> InsightLabel {
    if recovery_probability > 70.0 && churn_risk < 30.0 {
        InsightLabel::HighConfidenceRecovery
    } else if recovery_probability > 50.0 && churn_risk < 50.0 {
        InsightLabel::ModerateOpportunity
    } else if churn_risk > 70.0 {
        InsightLabel::HighChurnRisk
    } else if recovery_probability < 30.0 {
        InsightLabel::LowRecoveryPotential
    } else {
        InsightLabel::NurturePhase
    }
}

pub fn case_insight(case: &Case) -> CaseInsight {
    let scored = HeuristicEngine::new().score(case);
    let insight = insight_label(scored.recovery_probability, scored.churn_risk);

    CaseInsight {
        case_id: case.case_id.clone(),
        recovery_probability: scored.recovery_probability,
        churn_risk: scored.churn_risk,
        optimal_followup_days: scored.optimal_followup_days,
        insight,
        insight_label: insight.label(),
        next_action: scored.next_action,
        next_action_label: scored.next_action.label(),
    }
}
