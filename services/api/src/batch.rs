use clap::Args;
use dca_engine::cases::CaseTable;
use dca_engine::config::EngineConfig;
use dca_engine::decision::{self, AgentRollup, PortfolioSummary, PriorityBandSummary};
use dca_engine::error::AppError;
use dca_engine::prioritization::{ModelArtifact, PrioritizedCase};
use dca_engine::scoring::ScoredCase;
use dca_engine::service::PrioritizationService;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// CSV case table in the heuristic schema
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Write the enriched table to this path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Number of queued cases to print
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct PrioritizeArgs {
    /// CSV case table in the classifier schema
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// JSON classifier artifact
    #[arg(long)]
    pub(crate) model: PathBuf,
    /// Write the enriched table to this path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Number of ranked cases to print
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        input,
        output,
        limit,
    } = args;

    let table = CaseTable::from_path(&input)?;
    let service = PrioritizationService::default();
    let scored = service.score_cases(&table.cases()?);

    let limit = limit.unwrap_or(EngineConfig::default().rank_limit);
    let queue = service.action_queue(&scored, Some(limit));

    println!("Scored {} case(s) from {}", scored.len(), input.display());
    render_queue(&queue);
    render_portfolio(&service.portfolio_summary(&scored));
    render_agents(&service.agent_rollups(&scored));

    if let Some(path) = output {
        table.with_scores(&scored).write_path(&path)?;
        println!("\nEnriched table written to {}", path.display());
    }

    Ok(())
}

pub(crate) fn run_prioritize(args: PrioritizeArgs) -> Result<(), AppError> {
    let PrioritizeArgs {
        input,
        model,
        output,
        limit,
    } = args;

    let artifact = ModelArtifact::from_path(&model)?;
    let service = PrioritizationService::new(Some(Arc::new(artifact)));
    let table = CaseTable::from_path(&input)?;
    let prioritized = service.prioritize(&table.model_cases()?)?;

    let limit = limit.unwrap_or(EngineConfig::default().rank_limit);
    let ranked = decision::action_queue(&prioritized, Some(limit));

    println!(
        "Prioritized {} case(s) from {} using {}",
        prioritized.len(),
        input.display(),
        model.display()
    );
    render_ranked(&ranked);
    render_priority_bands(&service.priority_bands(&prioritized));

    if let Some(path) = output {
        table.with_priorities(&prioritized).write_path(&path)?;
        println!("\nEnriched table written to {}", path.display());
    }

    Ok(())
}

fn render_queue(queue: &[ScoredCase]) {
    println!("\nAction queue");
    if queue.is_empty() {
        println!("- No open cases");
        return;
    }

    for entry in decision::queue_entries(queue) {
        println!(
            "{:>3}. {} | priority {:.0} | recovery {:.1}% | churn {:.0} | {} | {} | follow up in {}d",
            entry.rank,
            entry.case_id,
            entry.priority_score,
            entry.recovery_probability,
            entry.churn_risk,
            entry.risk_level_label,
            entry.next_action_label,
            entry.optimal_followup_days
        );
    }
}

fn render_portfolio(summary: &PortfolioSummary) {
    println!("\nPortfolio summary");
    println!(
        "- {} case(s) | invoiced {:.2} | expected recovery {:.2} | {} blocked",
        summary.total_cases,
        summary.invoice_total,
        summary.expected_recovery_total,
        summary.blocked_cases
    );

    println!("By risk level:");
    for entry in &summary.by_risk_level {
        println!(
            "  - {}: {} case(s), expected {:.2}",
            entry.risk_level_label, entry.totals.cases, entry.totals.expected_recovery_total
        );
    }

    println!("By SLA status:");
    for entry in &summary.by_sla_status {
        println!(
            "  - {}: {} case(s)",
            entry.sla_status_label, entry.totals.cases
        );
    }

    println!("By recovery probability:");
    for entry in &summary.by_probability_band {
        println!("  - {}: {} case(s)", entry.band_label, entry.totals.cases);
    }
}

fn render_agents(rollups: &[AgentRollup]) {
    println!("\nAgent efficiency");
    if rollups.is_empty() {
        println!("- No assigned cases");
        return;
    }

    for rollup in rollups {
        println!(
            "- {}: score {:.1} | {} case(s) | avg recovery {:.1}% | avg {:.1}d since update | {:.0}% resolved",
            rollup.agent,
            rollup.efficiency_score,
            rollup.cases,
            rollup.avg_recovery_probability,
            rollup.avg_days_since_update,
            rollup.resolution_rate * 100.0
        );
    }
}

fn render_ranked(ranked: &[PrioritizedCase]) {
    println!("\nTop cases");
    for entry in decision::model_queue_entries(ranked) {
        println!(
            "{:>3}. {} | priority {:.2} | recovery {:.2} | confidence {} | {}",
            entry.rank,
            entry.case_id,
            entry.priority_score,
            entry.recovery_probability,
            entry.confidence_level.label(),
            entry.recommended_dca_label
        );
    }
}

fn render_priority_bands(summary: &PriorityBandSummary) {
    println!("\nPriority bands");
    println!(
        "- {} case(s) | average recovery probability {:.2}",
        summary.total_cases, summary.average_recovery_probability
    );
    for band in &summary.bands {
        println!(
            "  - {}: {} case(s), overdue {:.2}",
            band.band_label, band.cases, band.overdue_total
        );
    }
}
