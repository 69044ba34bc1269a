use crate::cases::{CaseId, SlaStatus};
use crate::prioritization::{ConfidenceLevel, DcaTier};
use crate::scoring::{NextAction, RiskLevel};
use serde::Serialize;

/// Recovery-probability bucket with fixed edges 0/20/40/60/80/100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityBand {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ProbabilityBand {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::VeryLow,
            Self::Low,
            Self::Moderate,
            Self::High,
            Self::VeryHigh,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "0-20%",
            Self::Low => "20-40%",
            Self::Moderate => "40-60%",
            Self::High => "60-80%",
            Self::VeryHigh => "80-100%",
        }
    }

    /// Lower edges are inclusive; the top band also holds exactly 100.
    pub fn for_probability(recovery_probability: f64) -> Self {
        match recovery_probability {
            p if p < 20.0 => Self::VeryLow,
            p if p < 40.0 => Self::Low,
            p if p < 60.0 => Self::Moderate,
            p if p < 80.0 => Self::High,
            _ => Self::VeryHigh,
        }
    }
}

/// Priority band for model-assisted scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityBand {
    High,
    Medium,
    Low,
}

impl PriorityBand {
    pub const fn ordered() -> [Self; 3] {
        [Self::High, Self::Medium, Self::Low]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High Priority",
            Self::Medium => "Medium Priority",
            Self::Low => "Low Priority",
        }
    }

    pub fn for_score(priority_score: f64) -> Self {
        if priority_score >= 0.75 {
            Self::High
        } else if priority_score >= 0.5 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightLabel {
    HighConfidenceRecovery,
    ModerateOpportunity,
    HighChurnRisk,
    LowRecoveryPotential,
    NurturePhase,
}

impl InsightLabel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HighConfidenceRecovery => "HIGH CONFIDENCE RECOVERY",
            Self::ModerateOpportunity => "MODERATE OPPORTUNITY",
            Self::HighChurnRisk => "HIGH CHURN RISK",
            Self::LowRecoveryPotential => "LOW RECOVERY POTENTIAL",
            Self::NurturePhase => "NURTURE PHASE",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BucketTotals {
    pub cases: usize,
    pub invoice_total: f64,
    pub expected_recovery_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskLevelEntry {
    pub risk_level: RiskLevel,
    pub risk_level_label: &'static str,
    #[serde(flatten)]
    pub totals: BucketTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlaStatusEntry {
    pub sla_status: SlaStatus,
    pub sla_status_label: &'static str,
    #[serde(flatten)]
    pub totals: BucketTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityBandEntry {
    pub band: ProbabilityBand,
    pub band_label: &'static str,
    #[serde(flatten)]
    pub totals: BucketTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total_cases: usize,
    pub invoice_total: f64,
    pub expected_recovery_total: f64,
    pub blocked_cases: usize,
    pub by_risk_level: Vec<RiskLevelEntry>,
    pub by_sla_status: Vec<SlaStatusEntry>,
    pub by_probability_band: Vec<ProbabilityBandEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityBandEntry {
    pub band: PriorityBand,
    pub band_label: &'static str,
    pub cases: usize,
    pub overdue_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityBandSummary {
    pub total_cases: usize,
    pub average_recovery_probability: f64,
    pub bands: Vec<PriorityBandEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentRollup {
    pub agent: String,
    pub cases: usize,
    pub avg_recovery_probability: f64,
    pub avg_days_since_update: f64,
    pub resolution_rate: f64,
    pub efficiency_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseInsight {
    pub case_id: CaseId,
    pub recovery_probability: f64,
    pub churn_risk: f64,
    pub optimal_followup_days: u32,
    pub insight: InsightLabel,
    pub insight_label: &'static str,
    pub next_action: NextAction,
    pub next_action_label: &'static str,
}

/// One row of the heuristic action queue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueEntry {
    pub rank: usize,
    pub case_id: CaseId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_dca: Option<String>,
    pub priority_score: f64,
    pub recovery_probability: f64,
    pub churn_risk: f64,
    pub risk_level: RiskLevel,
    pub risk_level_label: &'static str,
    pub expected_recovery: f64,
    pub next_action: NextAction,
    pub next_action_label: &'static str,
    pub optimal_followup_days: u32,
}

/// One row of the model-assisted ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelQueueEntry {
    pub rank: usize,
    pub case_id: CaseId,
    pub priority_score: f64,
    pub recovery_probability: f64,
    pub confidence_level: ConfidenceLevel,
    pub recommended_dca: DcaTier,
    pub recommended_dca_label: &'static str,
}
