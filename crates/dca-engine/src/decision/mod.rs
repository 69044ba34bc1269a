//! Decision layer built on scored cases: ranking, portfolio rollups, agent efficiency
//! and per-case insight bundles.

mod agents;
mod insights;
mod ranking;
mod rollups;
pub mod views;

pub use agents::{agent_efficiency_score, agent_rollups};
pub use insights::{case_insight, insight_label};
pub use ranking::{
    action_queue, compare_priority, model_queue_entries, queue_entries, ranked, Rankable,
};
pub use rollups::{portfolio_summary, priority_bands};
pub use views::{
    AgentRollup, CaseInsight, InsightLabel, PortfolioSummary, PriorityBand, PriorityBandSummary,
    ProbabilityBand,
};
