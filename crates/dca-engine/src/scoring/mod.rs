//! Rule-based scoring over a case's business attributes.
//!
//! Every function here is pure: the derived fields depend only on the case passed in,
//! so a batch can be scored in any order (or concurrently) with identical results.

mod actions;
mod rules;

#[cfg(test)]
mod tests;

pub use actions::{next_best_action, risk_assessment, NextAction, RiskLevel};
pub use rules::{
    compute_churn_risk, compute_optimal_followup_timing, compute_priority_score,
    compute_recovery_probability, compute_recovery_score, expected_recovery,
};

use crate::cases::Case;
use serde::Serialize;
use tracing::debug;

/// Column names written back to a case table by a heuristic scoring pass.
pub const DERIVED_COLUMNS: [&str; 8] = [
    "recovery_score",
    "recovery_probability",
    "churn_risk",
    "priority_score",
    "risk_level",
    "expected_recovery",
    "ai_next_action",
    "optimal_followup_days",
];

/// A case together with every field the heuristic engine derives from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCase {
    pub case: Case,
    pub recovery_score: f64,
    pub recovery_probability: f64,
    pub churn_risk: f64,
    pub priority_score: f64,
    pub risk_level: RiskLevel,
    pub expected_recovery: f64,
    pub next_action: NextAction,
    pub optimal_followup_days: u32,
}

impl ScoredCase {
    /// Cell values in [`DERIVED_COLUMNS`] order.
    pub fn derived_cells(&self) -> Vec<String> {
        vec![
            self.recovery_score.to_string(),
            self.recovery_probability.to_string(),
            self.churn_risk.to_string(),
            self.priority_score.to_string(),
            self.risk_level.label().to_string(),
            self.expected_recovery.to_string(),
            self.next_action.label().to_string(),
            self.optimal_followup_days.to_string(),
        ]
    }
}

/// Stateless heuristic engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEngine;

impl HeuristicEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, case: &Case) -> ScoredCase {
        let recovery_score = compute_recovery_score(case);
        let recovery_probability = rules::probability_from_score(recovery_score, case.ageing_days);

        ScoredCase {
            case: case.clone(),
            recovery_score,
            recovery_probability,
            churn_risk: compute_churn_risk(case),
            priority_score: rules::priority_from_score(case, recovery_score),
            risk_level: risk_assessment(case),
            expected_recovery: expected_recovery(case, recovery_probability),
            next_action: actions::action_for(case, recovery_probability),
            optimal_followup_days: rules::followup_from_probability(case, recovery_probability),
        }
    }

    pub fn score_all(&self, cases: &[Case]) -> Vec<ScoredCase> {
        let scored: Vec<ScoredCase> = cases.iter().map(|case| self.score(case)).collect();
        debug!(cases = scored.len(), "heuristic scoring pass complete");
        scored
    }
}

/// Score every case independently, preserving input order.
pub fn apply_scoring(cases: &[Case]) -> Vec<ScoredCase> {
    HeuristicEngine::new().score_all(cases)
}
