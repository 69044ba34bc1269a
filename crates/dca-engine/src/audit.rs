//! Append-only record of who did what to a case.
//!
//! The engine never reads the audit trail; it exists for callers that let collectors
//! and administrators act on ranked cases.

use crate::cases::CaseId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Admin,
    DcaAgent,
}

impl ActorRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::DcaAgent => "DCA Agent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub case_id: CaseId,
    pub actor_role: ActorRole,
    pub action: String,
    pub recorded_at: DateTime<Utc>,
}

/// Storage for audit events; implementations must keep insertion order per case.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: AuditEvent) -> Result<(), AuditError>;
    fn for_case(&self, case_id: &CaseId) -> Result<Vec<AuditEvent>, AuditError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit action must not be empty")]
    EmptyAction,
    #[error("audit log unavailable: {0}")]
    Unavailable(String),
}

/// Validate and append one action, stamped with the current time.
pub fn record_action(
    sink: &dyn AuditSink,
    case_id: CaseId,
    actor_role: ActorRole,
    action: &str,
) -> Result<AuditEvent, AuditError> {
    let action = action.trim();
    if action.is_empty() {
        return Err(AuditError::EmptyAction);
    }

    let event = AuditEvent {
        case_id,
        actor_role,
        action: action.to_string(),
        recorded_at: Utc::now(),
    };
    sink.record(event.clone())?;
    tracing::info!(
        case_id = %event.case_id,
        role = event.actor_role.label(),
        "audit event recorded"
    );
    Ok(event)
}
