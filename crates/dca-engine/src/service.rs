use crate::cases::{Case, CaseTable, ModelCase};
use crate::decision::{self, AgentRollup, CaseInsight, PortfolioSummary, PriorityBandSummary};
use crate::error::ScoringError;
use crate::prioritization::{ModelArtifact, ModelAssistedEngine, PrioritizedCase};
use crate::scoring::{HeuristicEngine, ScoredCase};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Which engine a batch is scored with. Paths never mix within one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPath {
    #[default]
    Heuristic,
    ModelAssisted,
}

impl ScoringPath {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Heuristic => "heuristic",
            Self::ModelAssisted => "model_assisted",
        }
    }
}

/// Result of scoring a whole table along one path, in input row order.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoredBatch {
    Heuristic(Vec<ScoredCase>),
    ModelAssisted(Vec<PrioritizedCase>),
}

impl ScoredBatch {
    pub fn path(&self) -> ScoringPath {
        match self {
            Self::Heuristic(_) => ScoringPath::Heuristic,
            Self::ModelAssisted(_) => ScoringPath::ModelAssisted,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Heuristic(scored) => scored.len(),
            Self::ModelAssisted(prioritized) => prioritized.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The source table with this batch's derived columns written back.
    pub fn enrich(&self, table: &CaseTable) -> CaseTable {
        match self {
            Self::Heuristic(scored) => table.with_scores(scored),
            Self::ModelAssisted(prioritized) => table.with_priorities(prioritized),
        }
    }
}

/// Entry point tying both engines to the decision layer.
///
/// The heuristic engine is always available; the model-assisted engine exists only when
/// a classifier artifact was supplied at construction.
#[derive(Debug, Clone, Default)]
pub struct PrioritizationService {
    heuristic: HeuristicEngine,
    model: Option<Arc<ModelAssistedEngine>>,
}

impl PrioritizationService {
    pub fn new(model: Option<Arc<ModelArtifact>>) -> Self {
        let model = model.map(|artifact| {
            Arc::new(ModelAssistedEngine::from_artifact(artifact.as_ref().clone()))
        });
        Self {
            heuristic: HeuristicEngine::new(),
            model,
        }
    }

    pub fn with_engine(engine: ModelAssistedEngine) -> Self {
        Self {
            heuristic: HeuristicEngine::new(),
            model: Some(Arc::new(engine)),
        }
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn score_cases(&self, cases: &[Case]) -> Vec<ScoredCase> {
        self.heuristic.score_all(cases)
    }

    pub fn prioritize(&self, cases: &[ModelCase]) -> Result<Vec<PrioritizedCase>, ScoringError> {
        let engine = self.model.as_ref().ok_or(ScoringError::ModelUnavailable)?;
        engine.prioritize_all(cases)
    }

    /// Parse and score every row; any malformed row fails the batch with nothing scored.
    pub fn score_table(
        &self,
        path: ScoringPath,
        table: &CaseTable,
    ) -> Result<ScoredBatch, ScoringError> {
        let batch = match path {
            ScoringPath::Heuristic => ScoredBatch::Heuristic(self.score_cases(&table.cases()?)),
            ScoringPath::ModelAssisted => {
                if !self.has_model() {
                    return Err(ScoringError::ModelUnavailable);
                }
                ScoredBatch::ModelAssisted(self.prioritize(&table.model_cases()?)?)
            }
        };

        info!(path = path.label(), cases = batch.len(), "scored case table");
        Ok(batch)
    }

    pub fn action_queue(&self, scored: &[ScoredCase], limit: Option<usize>) -> Vec<ScoredCase> {
        decision::action_queue(scored, limit)
    }

    pub fn insight(&self, case: &Case) -> CaseInsight {
        decision::case_insight(case)
    }

    pub fn agent_rollups(&self, scored: &[ScoredCase]) -> Vec<AgentRollup> {
        decision::agent_rollups(scored)
    }

    pub fn portfolio_summary(&self, scored: &[ScoredCase]) -> PortfolioSummary {
        decision::portfolio_summary(scored)
    }

    pub fn priority_bands(&self, prioritized: &[PrioritizedCase]) -> PriorityBandSummary {
        decision::priority_bands(prioritized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEURISTIC_CSV: &str = "case_id,invoice_amount,ageing_days,business_type,dispute_status,assigned_dca,last_dca_update_days,sla_status,status\n\
CASE_1,100000,30,Medium,None,DCA Agent 1,0,OK,ACTIVE\n\
CASE_2,600000,200,Small,None,DCA Agent 2,0,OK,ACTIVE\n";

    const MODEL_CSV: &str = "case_id,overdue_amount,days_overdue,customer_type,region,past_recovery_rate,dca_experience_score,previous_escalations\n\
CASE_1000,250000,73,SME,North,0.8,0.7,3\n";

    #[test]
    fn model_path_without_artifact_is_unavailable() {
        let table = CaseTable::from_reader(Cursor::new(MODEL_CSV)).expect("table");
        let error = PrioritizationService::default()
            .score_table(ScoringPath::ModelAssisted, &table)
            .expect_err("no artifact");
        assert_eq!(error, ScoringError::ModelUnavailable);
    }

    #[test]
    fn heuristic_batch_enriches_the_source_table() {
        let table = CaseTable::from_reader(Cursor::new(HEURISTIC_CSV)).expect("table");
        let batch = PrioritizationService::default()
            .score_table(ScoringPath::Heuristic, &table)
            .expect("scored");

        assert_eq!(batch.path(), ScoringPath::Heuristic);
        assert_eq!(batch.len(), 2);
        let enriched = batch.enrich(&table);
        let column = enriched.column("recovery_probability").expect("derived column");
        assert_eq!(enriched.rows()[1][column], "46.3");
    }

    #[test]
    fn scoring_path_defaults_to_heuristic() {
        assert_eq!(ScoringPath::default(), ScoringPath::Heuristic);
        let parsed: ScoringPath = serde_json::from_str("\"model_assisted\"").expect("path");
        assert_eq!(parsed, ScoringPath::ModelAssisted);
    }
}
