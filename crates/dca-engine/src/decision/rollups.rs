use super::views::{
    BucketTotals, PortfolioSummary, PriorityBand, PriorityBandEntry, PriorityBandSummary,
    ProbabilityBand, ProbabilityBandEntry, RiskLevelEntry, SlaStatusEntry,
};
use crate::cases::SlaStatus;
use crate::numeric::{mean, round_to};
use crate::prioritization::PrioritizedCase;
use crate::scoring::{RiskLevel, ScoredCase};
use std::collections::HashMap;

impl BucketTotals {
    fn add(&mut self, scored: &ScoredCase) {
        self.cases += 1;
        self.invoice_total += scored.case.invoice_amount;
        self.expected_recovery_total += scored.expected_recovery;
    }

    fn rounded(mut self) -> Self {
        self.invoice_total = round_to(self.invoice_total, 2);
        self.expected_recovery_total = round_to(self.expected_recovery_total, 2);
        self
    }
}

/// Portfolio totals bucketed by risk level, SLA status and recovery-probability band.
///
/// Buckets with no cases are omitted; the rest follow each enum's `ordered()` sequence.
pub fn portfolio_summary(scored: &[ScoredCase]) -> PortfolioSummary {
    let mut overall = BucketTotals::default();
    let mut by_risk: HashMap<RiskLevel, BucketTotals> = HashMap::new();
    let mut by_sla: HashMap<SlaStatus, BucketTotals> = HashMap::new();
    let mut by_band: HashMap<ProbabilityBand, BucketTotals> = HashMap::new();
    let mut blocked_cases = 0;

    for case in scored {
        overall.add(case);
        by_risk.entry(case.risk_level).or_default().add(case);
        by_sla.entry(case.case.sla_status).or_default().add(case);
        by_band
            .entry(ProbabilityBand::for_probability(case.recovery_probability))
            .or_default()
            .add(case);
        if case.next_action.is_blocker() {
            blocked_cases += 1;
        }
    }

    let by_risk_level = RiskLevel::ordered()
        .into_iter()
        .filter_map(|risk_level| {
            by_risk.remove(&risk_level).map(|totals| RiskLevelEntry {
                risk_level,
                risk_level_label: risk_level.label(),
                totals: totals.rounded(),
            })
        })
        .collect();

    let by_sla_status = SlaStatus::ordered()
        .into_iter()
        .filter_map(|sla_status| {
            by_sla.remove(&sla_status).map(|totals| SlaStatusEntry {
                sla_status,
                sla_status_label: sla_status.label(),
                totals: totals.rounded(),
            })
        })
        .collect();

    let by_probability_band = ProbabilityBand::ordered()
        .into_iter()
        .filter_map(|band| {
            by_band.remove(&band).map(|totals| ProbabilityBandEntry {
                band,
                band_label: band.label(),
                totals: totals.rounded(),
            })
        })
        .collect();

    let overall = overall.rounded();
    PortfolioSummary {
        total_cases: overall.cases,
        invoice_total: overall.invoice_total,
        expected_recovery_total: overall.expected_recovery_total,
        blocked_cases,
        by_risk_level,
        by_sla_status,
        by_probability_band,
    }
}

/// Case counts and overdue exposure per model-assisted priority band; all bands listed.
pub fn priority_bands(prioritized: &[PrioritizedCase]) -> PriorityBandSummary {
    let bands = PriorityBand::ordered()
        .into_iter()
        .map(|band| {
            let members: Vec<&PrioritizedCase> = prioritized
                .iter()
                .filter(|case| PriorityBand::for_score(case.priority_score) == band)
                .collect();
            PriorityBandEntry {
                band,
                band_label: band.label(),
                cases: members.len(),
                overdue_total: round_to(
                    members.iter().map(|case| case.case.overdue_amount).sum(),
                    2,
                ),
            }
        })
        .collect();

    PriorityBandSummary {
        total_cases: prioritized.len(),
        average_recovery_probability: round_to(
            mean(prioritized.iter().map(|case| case.recovery_probability)),
            2,
        ),
        bands,
    }
}
