use super::views::AgentRollup;
use crate::numeric::{mean, ratio, round_to};
use crate::scoring::ScoredCase;
use std::collections::BTreeMap;

const PROBABILITY_WEIGHT: f64 = 0.4;
const RESPONSIVENESS_WEIGHT: f64 = 0.3;
const RESOLUTION_WEIGHT: f64 = 0.3;

/// Share of cases with no dispute outstanding (Resolved or None).
fn resolution_rate(cases: &[&ScoredCase]) -> f64 {
    let settled = cases
        .iter()
        .filter(|scored| scored.case.dispute_status.is_settled())
        .count();
    ratio(settled, cases.len())
}

fn average_days_since_update(cases: &[&ScoredCase]) -> f64 {
    mean(cases.iter().map(|scored| scored.case.last_dca_update_days as f64))
}

/// Efficiency of one agent over its case set, rounded to 1 decimal; 0 for no cases.
///
/// Responsiveness is `100 - days since last update` and is not floored, so an agent
/// silent for more than 100 days on average drags the score below the other terms.
pub fn agent_efficiency_score(cases: &[&ScoredCase]) -> f64 {
    if cases.is_empty() {
        return 0.0;
    }

    let probability = mean(cases.iter().map(|scored| scored.recovery_probability));
    let responsiveness = 100.0 - average_days_since_update(cases);
    let resolution = resolution_rate(cases) * 100.0;

    round_to(
        PROBABILITY_WEIGHT * probability
            + RESPONSIVENESS_WEIGHT * responsiveness
            + RESOLUTION_WEIGHT * resolution,
        1,
    )
}

/// Per-agent rollups over assigned cases, most efficient first, ties by agent name.
pub fn agent_rollups(scored: &[ScoredCase]) -> Vec<AgentRollup> {
    let mut by_agent: BTreeMap<&str, Vec<&ScoredCase>> = BTreeMap::new();
    for case in scored {
        if let Some(agent) = case.case.assigned_dca.as_deref() {
            by_agent.entry(agent).or_default().push(case);
        }
    }

    let mut rollups: Vec<AgentRollup> = by_agent
        .into_iter()
        .map(|(agent, cases)| AgentRollup {
            agent: agent.to_string(),
            cases: cases.len(),
            avg_recovery_probability: round_to(
                mean(cases.iter().map(|scored| scored.recovery_probability)),
                1,
            ),
            avg_days_since_update: round_to(average_days_since_update(&cases), 1),
            resolution_rate: round_to(resolution_rate(&cases), 3),
            efficiency_score: agent_efficiency_score(&cases),
        })
        .collect();

    rollups.sort_by(|left, right| {
        right
            .efficiency_score
            .total_cmp(&left.efficiency_score)
            .then_with(|| left.agent.cmp(&right.agent))
    });
    rollups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cases::{Case, DisputeStatus};
    use crate::scoring::apply_scoring;

    fn assigned(id: &str, agent: &str, dispute: DisputeStatus, last_update: u32) -> Case {
        let mut case = Case::new(id, 100_000.0, 30)
            .with_dispute_status(dispute)
            .with_last_dca_update_days(last_update);
        case.assign(agent);
        case
    }

    #[test]
    fn agent_with_no_cases_scores_zero() {
        assert_eq!(agent_efficiency_score(&[]), 0.0);
    }

    #[test]
    fn efficiency_blends_probability_responsiveness_and_resolution() {
        let scored = apply_scoring(&[
            assigned("CASE_1", "DCA Agent 1", DisputeStatus::None, 0),
            assigned("CASE_2", "DCA Agent 1", DisputeStatus::Open, 10),
        ]);
        let refs: Vec<&ScoredCase> = scored.iter().collect();

        let probability = (scored[0].recovery_probability + scored[1].recovery_probability) / 2.0;
        let expected = round_to(0.4 * probability + 0.3 * 95.0 + 0.3 * 50.0, 1);
        assert_eq!(agent_efficiency_score(&refs), expected);
    }

    #[test]
    fn rollups_skip_unassigned_cases_and_sort_by_efficiency() {
        let mut cases = vec![
            assigned("CASE_1", "DCA Agent 2", DisputeStatus::Open, 25),
            assigned("CASE_2", "DCA Agent 1", DisputeStatus::Resolved, 1),
            assigned("CASE_3", "DCA Agent 1", DisputeStatus::None, 2),
        ];
        cases.push(Case::new("CASE_4", 5_000.0, 10));
        let rollups = agent_rollups(&apply_scoring(&cases));

        assert_eq!(rollups.len(), 2);
        assert_eq!(rollups[0].agent, "DCA Agent 1");
        assert_eq!(rollups[0].cases, 2);
        assert_eq!(rollups[0].resolution_rate, 1.0);
        assert_eq!(rollups[1].agent, "DCA Agent 2");
        assert_eq!(rollups[1].resolution_rate, 0.0);
        assert!(rollups[0].efficiency_score > rollups[1].efficiency_score);
    }
}
