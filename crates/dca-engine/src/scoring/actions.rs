use super::rules::{compute_recovery_probability, STALE_UPDATE_DAYS};
use crate::cases::{Case, DisputeStatus, SlaStatus};
use serde::{Deserialize, Serialize};

const LEGAL_ESCALATION_AMOUNT: f64 = 500_000.0;
const LEGAL_ESCALATION_AGEING_DAYS: u32 = 90;
const SETTLEMENT_REVIEW_AMOUNT: f64 = 250_000.0;
const SETTLEMENT_REVIEW_PROBABILITY: f64 = 30.0;

/// Fixed set of recommendations a collector can be handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    ResolveDispute,
    EscalateUnresponsiveDca,
    SlaBreachReview,
    EscalateToLegal,
    SettlementReview,
    AggressiveFollowUp,
    PriorityFollowUpCampaign,
    StandardCollection,
    Nurture,
    LowProbabilityReview,
}

impl NextAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ResolveDispute => "Resolve Dispute First",
            Self::EscalateUnresponsiveDca => "Auto-Escalate: DCA Unresponsive",
            Self::SlaBreachReview => "CRITICAL: SLA Breach \u{2013} Manager Review",
            Self::EscalateToLegal => "Escalate to Legal Team",
            Self::SettlementReview => "Review for Settlement / Write-off",
            Self::AggressiveFollowUp => "Aggressive Follow-up",
            Self::PriorityFollowUpCampaign => "Priority Follow-up Campaign",
            Self::StandardCollection => "Standard Collection Process",
            Self::Nurture => "Nurture Phase",
            Self::LowProbabilityReview => "Low Probability \u{2013} Review Strategy",
        }
    }

    /// Blockers that must be cleared before ordinary collection work resumes.
    pub const fn is_blocker(self) -> bool {
        matches!(
            self,
            Self::ResolveDispute | Self::EscalateUnresponsiveDca | Self::SlaBreachReview
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const fn ordered() -> [Self; 4] {
        [Self::Low, Self::Medium, Self::High, Self::Critical]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

pub(crate) fn action_for(case: &Case, recovery_probability: f64) -> NextAction {
    if case.dispute_status == DisputeStatus::Open {
        return NextAction::ResolveDispute;
    }

    if case.last_dca_update_days > STALE_UPDATE_DAYS {
        return NextAction::EscalateUnresponsiveDca;
    }

    if case.sla_status == SlaStatus::Breached {
        return NextAction::SlaBreachReview;
    }

    if case.invoice_amount > LEGAL_ESCALATION_AMOUNT
        && case.ageing_days > LEGAL_ESCALATION_AGEING_DAYS
    {
        return NextAction::EscalateToLegal;
    }

    if case.invoice_amount > SETTLEMENT_REVIEW_AMOUNT
        && recovery_probability < SETTLEMENT_REVIEW_PROBABILITY
    {
        return NextAction::SettlementReview;
    }

    match recovery_probability {
        p if p > 80.0 => NextAction::AggressiveFollowUp,
        p if p > 60.0 => NextAction::PriorityFollowUpCampaign,
        p if p > 40.0 => NextAction::StandardCollection,
        p if p > 20.0 => NextAction::Nurture,
        _ => NextAction::LowProbabilityReview,
    }
}

/// Ordered decision list: blockers first, then escalations, then probability tiers.
pub fn next_best_action(case: &Case) -> NextAction {
    action_for(case, compute_recovery_probability(case))
}

pub fn risk_assessment(case: &Case) -> RiskLevel {
    match case.ageing_days {
        days if days > 120 && case.dispute_status == DisputeStatus::Open => RiskLevel::Critical,
        days if days > 120 => RiskLevel::High,
        days if days > 60 => RiskLevel::Medium,
        _ => RiskLevel::Low,
    }
}
