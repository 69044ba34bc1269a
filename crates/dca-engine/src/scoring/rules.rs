use crate::cases::{BusinessType, Case, DisputeStatus, SlaStatus};
use crate::numeric::round_to;

const BASE_RECOVERY_SCORE: f64 = 0.5;

const AGEING_DECAY_RATE: f64 = 0.015;
const AGEING_WEIGHT: f64 = 0.35;

const SEGMENT_WEIGHT: f64 = 0.15;

const RESPONSIVENESS_WINDOW_DAYS: f64 = 30.0;
const RESPONSIVENESS_WEIGHT: f64 = 0.20;
pub(crate) const STALE_UPDATE_DAYS: u32 = 14;
const STALE_UPDATE_PENALTY: f64 = 0.15;

const INVOICE_SIZE_CAP: f64 = 500_000.0;
const INVOICE_SIZE_WEIGHT: f64 = 0.10;

const URGENCY_HORIZON_DAYS: f64 = 180.0;

/// Relative recoverability of a segment, Medium sitting just under parity.
pub(crate) const fn segment_multiplier(business_type: BusinessType) -> f64 {
    match business_type {
        BusinessType::Enterprise => 1.25,
        BusinessType::Large => 1.10,
        BusinessType::Medium => 0.95,
        BusinessType::Small => 0.70,
    }
}

const fn dispute_adjustment(dispute_status: DisputeStatus) -> f64 {
    match dispute_status {
        DisputeStatus::Open => -0.40,
        DisputeStatus::PendingResolution => -0.20,
        DisputeStatus::Resolved => 0.10,
        DisputeStatus::None => 0.0,
    }
}

const fn sla_penalty(sla_status: SlaStatus) -> f64 {
    match sla_status {
        SlaStatus::Breached => 0.25,
        SlaStatus::AtRisk => 0.10,
        SlaStatus::Ok => 0.0,
    }
}

fn responsiveness_adjustment(last_dca_update_days: u32) -> f64 {
    let freshness = (1.0 - last_dca_update_days as f64 / RESPONSIVENESS_WINDOW_DAYS).max(0.0);
    let mut adjustment = freshness * RESPONSIVENESS_WEIGHT;
    if last_dca_update_days > STALE_UPDATE_DAYS {
        adjustment -= STALE_UPDATE_PENALTY;
    }
    adjustment
}

fn invoice_amount(case: &Case) -> f64 {
    case.invoice_amount.max(0.0)
}

/// Likelihood of recovery in `[0, 1]`, rounded to 3 decimals.
///
/// Starts from 0.5 and adds a continuous ageing decay, segment, dispute,
/// DCA responsiveness, SLA and invoice-size adjustments before clamping.
pub fn compute_recovery_score(case: &Case) -> f64 {
    let ageing = (-AGEING_DECAY_RATE * case.ageing_days as f64).exp() * AGEING_WEIGHT;
    let segment = (segment_multiplier(case.business_type) - 1.0) * SEGMENT_WEIGHT;
    let dispute = dispute_adjustment(case.dispute_status);
    let responsiveness = responsiveness_adjustment(case.last_dca_update_days);
    let sla = sla_penalty(case.sla_status);
    let invoice = (invoice_amount(case) / INVOICE_SIZE_CAP).min(1.0) * INVOICE_SIZE_WEIGHT;

    let score = BASE_RECOVERY_SCORE + ageing + segment + dispute + responsiveness - sla + invoice;
    round_to(score.clamp(0.0, 1.0), 3)
}

fn ageing_damping(ageing_days: u32) -> f64 {
    match ageing_days {
        days if days > 180 => 0.6,
        days if days > 120 => 0.75,
        days if days > 60 => 0.9,
        _ => 1.0,
    }
}

pub(crate) fn probability_from_score(recovery_score: f64, ageing_days: u32) -> f64 {
    round_to(recovery_score * 100.0 * ageing_damping(ageing_days), 1)
}

/// Recovery probability as a percentage, damped for old debt and rounded to 1 decimal.
pub fn compute_recovery_probability(case: &Case) -> f64 {
    probability_from_score(compute_recovery_score(case), case.ageing_days)
}

/// Additive non-payment risk in `[0, 100]`.
pub fn compute_churn_risk(case: &Case) -> f64 {
    let mut risk: f64 = 0.0;

    risk += match case.ageing_days {
        days if days > 180 => 40.0,
        days if days > 120 => 30.0,
        days if days > 60 => 15.0,
        _ => 0.0,
    };

    risk += match case.dispute_status {
        DisputeStatus::Open => 35.0,
        DisputeStatus::PendingResolution => 15.0,
        DisputeStatus::Resolved | DisputeStatus::None => 0.0,
    };

    risk += match case.last_dca_update_days {
        days if days > 21 => 25.0,
        days if days > STALE_UPDATE_DAYS => 15.0,
        _ => 0.0,
    };

    risk += match case.business_type {
        BusinessType::Small => 20.0,
        BusinessType::Medium => 10.0,
        BusinessType::Large | BusinessType::Enterprise => 0.0,
    };

    if case.sla_status == SlaStatus::Breached {
        risk += 20.0;
    }

    risk.clamp(0.0, 100.0)
}

pub(crate) fn priority_from_score(case: &Case, recovery_score: f64) -> f64 {
    let urgency = 1.0 + case.ageing_days as f64 / URGENCY_HORIZON_DAYS;
    (recovery_score * invoice_amount(case) * urgency).round()
}

/// Monetary-weighted ranking score: recovery score × invoice × ageing urgency, whole units.
pub fn compute_priority_score(case: &Case) -> f64 {
    priority_from_score(case, compute_recovery_score(case))
}

pub(crate) fn followup_from_probability(case: &Case, recovery_probability: f64) -> u32 {
    if case.last_dca_update_days > STALE_UPDATE_DAYS {
        return 1;
    }

    let base: u32 = match recovery_probability {
        p if p > 75.0 => 3,
        p if p > 60.0 => 5,
        p if p > 40.0 => 7,
        p if p > 20.0 => 14,
        _ => 30,
    };

    if case.ageing_days > 150 {
        base.saturating_sub(2).max(1)
    } else {
        base
    }
}

/// Days until the next recommended touch point.
pub fn compute_optimal_followup_timing(case: &Case) -> u32 {
    followup_from_probability(case, compute_recovery_probability(case))
}

/// Amount expected back: invoice × probability, in cents and never above the invoice.
pub fn expected_recovery(case: &Case, recovery_probability: f64) -> f64 {
    let invoice = invoice_amount(case);
    round_to(invoice * recovery_probability / 100.0, 2).min(invoice)
}
