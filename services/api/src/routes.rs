use crate::infra::{AppState, CaseApiState};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use dca_engine::audit::{record_action, ActorRole, AuditEvent};
use dca_engine::cases::{
    BusinessType, Case, CaseId, CaseStatus, CaseTable, DisputeStatus, SlaStatus,
};
use dca_engine::decision::views::{ModelQueueEntry, QueueEntry};
use dca_engine::decision::{
    self, AgentRollup, CaseInsight, PortfolioSummary, PriorityBandSummary,
};
use dca_engine::error::{AppError, ScoringError};
use dca_engine::service::{ScoredBatch, ScoringPath};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    pub(crate) cases_csv: String,
    #[serde(default)]
    pub(crate) path: ScoringPath,
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub(crate) enum ScoreResponse {
    Heuristic {
        total_cases: usize,
        queue: Vec<QueueEntry>,
        portfolio: PortfolioSummary,
        agents: Vec<AgentRollup>,
    },
    ModelAssisted {
        total_cases: usize,
        ranked: Vec<ModelQueueEntry>,
        priority_bands: PriorityBandSummary,
    },
}

/// Single heuristic-schema case; optional fields take the same defaults as a CSV import.
///
/// Required fields are checked in `TryFrom` so a missing one surfaces as a malformed case.
#[derive(Debug, Deserialize)]
pub(crate) struct CaseInput {
    #[serde(default)]
    pub(crate) case_id: Option<String>,
    #[serde(default)]
    pub(crate) invoice_amount: Option<f64>,
    #[serde(default)]
    pub(crate) ageing_days: Option<u32>,
    #[serde(default)]
    pub(crate) business_type: BusinessType,
    #[serde(default)]
    pub(crate) dispute_status: DisputeStatus,
    #[serde(default)]
    pub(crate) assigned_dca: Option<String>,
    #[serde(default)]
    pub(crate) last_dca_update_days: u32,
    #[serde(default)]
    pub(crate) sla_status: Option<SlaStatus>,
    #[serde(default)]
    pub(crate) status: CaseStatus,
}

impl TryFrom<CaseInput> for Case {
    type Error = ScoringError;

    fn try_from(input: CaseInput) -> Result<Self, Self::Error> {
        let case_id = input
            .case_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ScoringError::malformed("request", "missing required field case_id")
            })?;
        let invoice_amount = input.invoice_amount.ok_or_else(|| {
            ScoringError::malformed(case_id.clone(), "missing required field invoice_amount")
        })?;
        let ageing_days = input.ageing_days.ok_or_else(|| {
            ScoringError::malformed(case_id.clone(), "missing required field ageing_days")
        })?;

        if !invoice_amount.is_finite() || invoice_amount < 0.0 {
            return Err(ScoringError::malformed(
                case_id,
                "invoice_amount must be a non-negative number",
            ));
        }

        let mut case = Case::new(case_id, invoice_amount, ageing_days)
            .with_business_type(input.business_type)
            .with_dispute_status(input.dispute_status)
            .with_last_dca_update_days(input.last_dca_update_days)
            .with_sla_status(
                input
                    .sla_status
                    .unwrap_or_else(|| SlaStatus::for_ageing(ageing_days)),
            );
        if let Some(agent) = input.assigned_dca {
            case.assign(agent);
        }
        case.transition(input.status);
        Ok(case)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuditRequest {
    pub(crate) actor_role: ActorRole,
    pub(crate) action: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AuditTrail {
    pub(crate) case_id: CaseId,
    pub(crate) events: Vec<AuditEvent>,
}

pub(crate) fn case_router(state: CaseApiState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/cases/score", post(score_endpoint))
        .route("/api/v1/cases/insight", post(insight_endpoint))
        .route(
            "/api/v1/cases/:case_id/audit",
            get(audit_trail_endpoint).post(record_audit_endpoint),
        )
        .with_state(state)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn score_endpoint(
    State(state): State<CaseApiState>,
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let ScoreRequest {
        cases_csv,
        path,
        limit,
    } = payload;

    let table = CaseTable::from_reader(Cursor::new(cases_csv.into_bytes()))?;
    let limit = Some(limit.unwrap_or(state.rank_limit));

    let response = match state.service.score_table(path, &table)? {
        ScoredBatch::Heuristic(scored) => {
            let queue = state.service.action_queue(&scored, limit);
            ScoreResponse::Heuristic {
                total_cases: scored.len(),
                queue: decision::queue_entries(&queue),
                portfolio: state.service.portfolio_summary(&scored),
                agents: state.service.agent_rollups(&scored),
            }
        }
        ScoredBatch::ModelAssisted(prioritized) => {
            let ranked = decision::action_queue(&prioritized, limit);
            ScoreResponse::ModelAssisted {
                total_cases: prioritized.len(),
                ranked: decision::model_queue_entries(&ranked),
                priority_bands: state.service.priority_bands(&prioritized),
            }
        }
    };

    Ok(Json(response))
}

pub(crate) async fn insight_endpoint(
    State(state): State<CaseApiState>,
    Json(input): Json<CaseInput>,
) -> Result<Json<CaseInsight>, AppError> {
    let case = Case::try_from(input)?;
    Ok(Json(state.service.insight(&case)))
}

pub(crate) async fn record_audit_endpoint(
    State(state): State<CaseApiState>,
    Path(case_id): Path<String>,
    Json(payload): Json<AuditRequest>,
) -> Result<(StatusCode, Json<AuditEvent>), AppError> {
    let event = record_action(
        state.audit.as_ref(),
        CaseId(case_id),
        payload.actor_role,
        &payload.action,
    )?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub(crate) async fn audit_trail_endpoint(
    State(state): State<CaseApiState>,
    Path(case_id): Path<String>,
) -> Result<Json<AuditTrail>, AppError> {
    let case_id = CaseId(case_id);
    let events = state.audit.for_case(&case_id)?;
    Ok(Json(AuditTrail { case_id, events }))
}
