use super::views::{ModelQueueEntry, QueueEntry};
use crate::cases::CaseId;
use crate::prioritization::PrioritizedCase;
use crate::scoring::ScoredCase;
use std::cmp::Ordering;

/// Anything that can be placed in a priority-ordered queue.
pub trait Rankable {
    fn case_id(&self) -> &CaseId;
    fn priority_score(&self) -> f64;
    fn ageing_days(&self) -> u32;

    fn is_closed(&self) -> bool {
        false
    }
}

impl Rankable for ScoredCase {
    fn case_id(&self) -> &CaseId {
        &self.case.case_id
    }

    fn priority_score(&self) -> f64 {
        self.priority_score
    }

    fn ageing_days(&self) -> u32 {
        self.case.ageing_days
    }

    fn is_closed(&self) -> bool {
        self.case.is_closed()
    }
}

impl Rankable for PrioritizedCase {
    fn case_id(&self) -> &CaseId {
        &self.case.case_id
    }

    fn priority_score(&self) -> f64 {
        self.priority_score
    }

    fn ageing_days(&self) -> u32 {
        self.case.days_overdue
    }
}

/// Priority descending, then oldest first, then case id ascending.
pub fn compare_priority<T: Rankable>(left: &T, right: &T) -> Ordering {
    right
        .priority_score()
        .total_cmp(&left.priority_score())
        .then_with(|| right.ageing_days().cmp(&left.ageing_days()))
        .then_with(|| left.case_id().cmp(right.case_id()))
}

pub fn ranked<T: Rankable + Clone>(cases: &[T]) -> Vec<T> {
    let mut ordered = cases.to_vec();
    ordered.sort_by(compare_priority);
    ordered
}

/// Ranked open work: closed cases are dropped before `limit` is applied.
pub fn action_queue<T: Rankable + Clone>(cases: &[T], limit: Option<usize>) -> Vec<T> {
    let mut open: Vec<T> = cases.iter().filter(|case| !case.is_closed()).cloned().collect();
    open.sort_by(compare_priority);
    if let Some(limit) = limit {
        open.truncate(limit);
    }
    open
}

pub fn queue_entries(ranked: &[ScoredCase]) -> Vec<QueueEntry> {
    ranked
        .iter()
        .enumerate()
        .map(|(index, scored)| QueueEntry {
            rank: index + 1,
            case_id: scored.case.case_id.clone(),
            assigned_dca: scored.case.assigned_dca.clone(),
            priority_score: scored.priority_score,
            recovery_probability: scored.recovery_probability,
            churn_risk: scored.churn_risk,
            risk_level: scored.risk_level,
            risk_level_label: scored.risk_level.label(),
            expected_recovery: scored.expected_recovery,
            next_action: scored.next_action,
            next_action_label: scored.next_action.label(),
            optimal_followup_days: scored.optimal_followup_days,
        })
        .collect()
}

pub fn model_queue_entries(ranked: &[PrioritizedCase]) -> Vec<ModelQueueEntry> {
    ranked
        .iter()
        .enumerate()
        .map(|(index, prioritized)| ModelQueueEntry {
            rank: index + 1,
            case_id: prioritized.case.case_id.clone(),
            priority_score: prioritized.priority_score,
            recovery_probability: prioritized.recovery_probability,
            confidence_level: prioritized.confidence_level,
            recommended_dca: prioritized.recommended_dca,
            recommended_dca_label: prioritized.recommended_dca.label(),
        })
        .collect()
}
