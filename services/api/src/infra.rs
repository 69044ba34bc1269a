use dca_engine::audit::{AuditError, AuditEvent, AuditSink};
use dca_engine::cases::CaseId;
use dca_engine::config::EngineConfig;
use dca_engine::error::AppError;
use dca_engine::prioritization::ModelArtifact;
use dca_engine::service::PrioritizationService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Shared handles for the case endpoints.
#[derive(Clone)]
pub(crate) struct CaseApiState {
    pub(crate) service: Arc<PrioritizationService>,
    pub(crate) audit: Arc<dyn AuditSink>,
    pub(crate) rank_limit: usize,
}

impl CaseApiState {
    pub(crate) fn new(service: PrioritizationService, rank_limit: usize) -> Self {
        Self {
            service: Arc::new(service),
            audit: Arc::new(InMemoryAuditLog::default()),
            rank_limit,
        }
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAuditLog {
    events: Arc<Mutex<Vec<AuditEvent>>>,
}

impl InMemoryAuditLog {
    fn poisoned() -> AuditError {
        AuditError::Unavailable("audit log mutex poisoned".to_string())
    }
}

impl AuditSink for InMemoryAuditLog {
    fn record(&self, event: AuditEvent) -> Result<(), AuditError> {
        let mut guard = self.events.lock().map_err(|_| Self::poisoned())?;
        guard.push(event);
        Ok(())
    }

    fn for_case(&self, case_id: &CaseId) -> Result<Vec<AuditEvent>, AuditError> {
        let guard = self.events.lock().map_err(|_| Self::poisoned())?;
        Ok(guard
            .iter()
            .filter(|event| &event.case_id == case_id)
            .cloned()
            .collect())
    }
}

/// Build the scoring service, loading the classifier artifact when one is configured.
pub(crate) fn load_service(config: &EngineConfig) -> Result<PrioritizationService, AppError> {
    match &config.model_artifact {
        Some(path) => {
            let artifact = ModelArtifact::from_path(path)?;
            Ok(PrioritizationService::new(Some(Arc::new(artifact))))
        }
        None => {
            info!("no model artifact configured; model-assisted scoring disabled");
            Ok(PrioritizationService::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dca_engine::audit::ActorRole;

    #[test]
    fn audit_log_filters_by_case() {
        let log = InMemoryAuditLog::default();
        let actions = [("CASE_1", "Called"), ("CASE_2", "Emailed"), ("CASE_1", "Closed")];
        for (case_id, action) in actions {
            log.record(AuditEvent {
                case_id: CaseId::from(case_id),
                actor_role: ActorRole::DcaAgent,
                action: action.to_string(),
                recorded_at: chrono::Utc::now(),
            })
            .expect("recorded");
        }

        let events = log.for_case(&CaseId::from("CASE_1")).expect("events");
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].action, "Closed");
    }

    #[test]
    fn missing_artifact_fails_service_startup() {
        let config = EngineConfig {
            model_artifact: Some("./no-such-model.json".into()),
            rank_limit: 10,
        };
        let error = load_service(&config).expect_err("artifact missing");
        assert!(matches!(error, AppError::Model(_)));
    }

    #[test]
    fn service_without_artifact_is_heuristic_only() {
        let service = load_service(&EngineConfig::default()).expect("service");
        assert!(!service.has_model());
    }
}
