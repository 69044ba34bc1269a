use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identifier for a collection case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(pub String);

impl CaseId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CaseId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CaseId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Raised when a categorical column holds a value outside its enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedValue {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnrecognizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnrecognizedValue {}

// Case-insensitive, ignoring separators so "Pending_Resolution", "pending resolution"
// and "PENDING-RESOLUTION" all compare equal.
fn token(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn unrecognized(kind: &'static str, value: &str) -> UnrecognizedValue {
    UnrecognizedValue {
        kind,
        value: value.to_string(),
    }
}

/// Customer segment. The legacy two-tier schema value `SME` maps onto `Small`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum BusinessType {
    Enterprise,
    Large,
    #[default]
    Medium,
    Small,
}

impl BusinessType {
    pub const fn ordered() -> [Self; 4] {
        [Self::Enterprise, Self::Large, Self::Medium, Self::Small]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Enterprise => "Enterprise",
            Self::Large => "Large",
            Self::Medium => "Medium",
            Self::Small => "Small",
        }
    }
}

impl FromStr for BusinessType {
    type Err = UnrecognizedValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match token(value).as_str() {
            "enterprise" => Ok(Self::Enterprise),
            "large" => Ok(Self::Large),
            "medium" => Ok(Self::Medium),
            "small" | "sme" => Ok(Self::Small),
            _ => Err(unrecognized("business_type", value)),
        }
    }
}

impl TryFrom<String> for BusinessType {
    type Error = UnrecognizedValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BusinessType> for &'static str {
    fn from(value: BusinessType) -> Self {
        value.label()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum DisputeStatus {
    #[default]
    None,
    Open,
    PendingResolution,
    Resolved,
}

impl DisputeStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Open => "Open",
            Self::PendingResolution => "Pending_Resolution",
            Self::Resolved => "Resolved",
        }
    }

    /// Disputes that no longer block collection.
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::None | Self::Resolved)
    }
}

impl FromStr for DisputeStatus {
    type Err = UnrecognizedValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match token(value).as_str() {
            "none" => Ok(Self::None),
            "open" => Ok(Self::Open),
            "pendingresolution" | "pending" => Ok(Self::PendingResolution),
            "resolved" => Ok(Self::Resolved),
            _ => Err(unrecognized("dispute_status", value)),
        }
    }
}

impl TryFrom<String> for DisputeStatus {
    type Error = UnrecognizedValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DisputeStatus> for &'static str {
    fn from(value: DisputeStatus) -> Self {
        value.label()
    }
}

/// Days of ageing after which a case is at risk of, or has breached, its SLA.
pub const SLA_AT_RISK_AFTER_DAYS: u32 = 20;
pub const SLA_BREACHED_AFTER_DAYS: u32 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum SlaStatus {
    #[default]
    Ok,
    AtRisk,
    Breached,
}

impl SlaStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Ok, Self::AtRisk, Self::Breached]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::AtRisk => "AT_RISK",
            Self::Breached => "BREACHED",
        }
    }

    pub const fn for_ageing(ageing_days: u32) -> Self {
        if ageing_days > SLA_BREACHED_AFTER_DAYS {
            Self::Breached
        } else if ageing_days > SLA_AT_RISK_AFTER_DAYS {
            Self::AtRisk
        } else {
            Self::Ok
        }
    }
}

impl FromStr for SlaStatus {
    type Err = UnrecognizedValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match token(value).as_str() {
            "ok" => Ok(Self::Ok),
            "atrisk" => Ok(Self::AtRisk),
            "breached" => Ok(Self::Breached),
            _ => Err(unrecognized("sla_status", value)),
        }
    }
}

impl TryFrom<String> for SlaStatus {
    type Error = UnrecognizedValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlaStatus> for &'static str {
    fn from(value: SlaStatus) -> Self {
        value.label()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum CaseStatus {
    #[default]
    Active,
    PendingReview,
    Escalated,
    Closed,
}

impl CaseStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::PendingReview => "PENDING_REVIEW",
            Self::Escalated => "ESCALATED",
            Self::Closed => "CLOSED",
        }
    }
}

impl FromStr for CaseStatus {
    type Err = UnrecognizedValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match token(value).as_str() {
            "active" => Ok(Self::Active),
            "pendingreview" => Ok(Self::PendingReview),
            "escalated" => Ok(Self::Escalated),
            "closed" => Ok(Self::Closed),
            _ => Err(unrecognized("status", value)),
        }
    }
}

impl TryFrom<String> for CaseStatus {
    type Error = UnrecognizedValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CaseStatus> for &'static str {
    fn from(value: CaseStatus) -> Self {
        value.label()
    }
}

/// Typed case record consumed by the heuristic engine.
///
/// Optional inputs carry documented defaults: `business_type` Medium, `dispute_status`
/// None, `last_dca_update_days` 0, `status` ACTIVE. A case built through [`Case::new`]
/// starts with `sla_status` OK; table imports derive it from ageing when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Case {
    pub case_id: CaseId,
    pub invoice_amount: f64,
    pub ageing_days: u32,
    pub business_type: BusinessType,
    pub dispute_status: DisputeStatus,
    pub assigned_dca: Option<String>,
    pub last_dca_update_days: u32,
    pub sla_status: SlaStatus,
    pub status: CaseStatus,
}

impl Case {
    pub fn new(case_id: impl Into<CaseId>, invoice_amount: f64, ageing_days: u32) -> Self {
        Self {
            case_id: case_id.into(),
            invoice_amount,
            ageing_days,
            business_type: BusinessType::default(),
            dispute_status: DisputeStatus::default(),
            assigned_dca: None,
            last_dca_update_days: 0,
            sla_status: SlaStatus::Ok,
            status: CaseStatus::Active,
        }
    }

    pub fn with_business_type(mut self, business_type: BusinessType) -> Self {
        self.business_type = business_type;
        self
    }

    pub fn with_dispute_status(mut self, dispute_status: DisputeStatus) -> Self {
        self.dispute_status = dispute_status;
        self
    }

    pub fn with_last_dca_update_days(mut self, days: u32) -> Self {
        self.last_dca_update_days = days;
        self
    }

    pub fn with_sla_status(mut self, sla_status: SlaStatus) -> Self {
        self.sla_status = sla_status;
        self
    }

    pub fn assign(&mut self, agent: impl Into<String>) {
        self.assigned_dca = Some(agent.into());
    }

    pub fn transition(&mut self, status: CaseStatus) {
        self.status = status;
    }

    pub fn is_closed(&self) -> bool {
        self.status == CaseStatus::Closed
    }
}

/// Case record in the schema the recovery classifier was trained on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelCase {
    pub case_id: CaseId,
    pub overdue_amount: f64,
    pub days_overdue: u32,
    pub customer_type: String,
    pub region: String,
    pub past_recovery_rate: f64,
    pub dca_experience_score: f64,
    pub previous_escalations: u32,
}
