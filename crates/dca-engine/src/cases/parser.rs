use super::domain::{
    BusinessType, Case, CaseId, CaseStatus, DisputeStatus, ModelCase, SlaStatus,
    UnrecognizedValue,
};
use super::table::CaseTable;
use crate::error::ScoringError;
use std::str::FromStr;

/// Borrowed view over one table row that resolves cells by header name.
pub(crate) struct RowView<'a> {
    table: &'a CaseTable,
    index: usize,
    cells: &'a [String],
}

impl<'a> RowView<'a> {
    pub(crate) fn new(table: &'a CaseTable, index: usize, cells: &'a [String]) -> Self {
        Self {
            table,
            index,
            cells,
        }
    }

    /// Non-empty cell for `column`, or `None` when the column or value is absent.
    fn text(&self, column: &str) -> Option<&'a str> {
        self.table
            .column(column)
            .and_then(|position| self.cells.get(position))
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    // Rows without a usable case_id are reported by their 1-based data row number.
    fn label(&self) -> String {
        self.text("case_id")
            .map(str::to_string)
            .unwrap_or_else(|| format!("row {}", self.index + 1))
    }

    fn malformed(&self, reason: impl Into<String>) -> ScoringError {
        ScoringError::malformed(self.label(), reason)
    }

    fn required(&self, column: &str) -> Result<&'a str, ScoringError> {
        self.text(column)
            .ok_or_else(|| self.malformed(format!("missing required field {column}")))
    }

    fn amount(&self, column: &str) -> Result<f64, ScoringError> {
        let raw = self.required(column)?;
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
            _ => Err(self.malformed(format!(
                "{column} must be a non-negative number, got '{raw}'"
            ))),
        }
    }

    fn days(&self, column: &str) -> Result<u32, ScoringError> {
        let raw = self.required(column)?;
        parse_day_count(raw).ok_or_else(|| {
            self.malformed(format!(
                "{column} must be a non-negative whole number, got '{raw}'"
            ))
        })
    }

    fn optional_days(&self, column: &str) -> Result<Option<u32>, ScoringError> {
        match self.text(column) {
            Some(_) => self.days(column).map(Some),
            None => Ok(None),
        }
    }

    fn category<T>(&self, column: &str) -> Result<Option<T>, ScoringError>
    where
        T: FromStr<Err = UnrecognizedValue>,
    {
        self.text(column)
            .map(|raw| raw.parse::<T>().map_err(|err| self.malformed(err.to_string())))
            .transpose()
    }
}

// Accepts "42" as well as spreadsheet-style "42.0"; rejects negatives and fractions.
fn parse_day_count(raw: &str) -> Option<u32> {
    if let Ok(days) = raw.parse::<u32>() {
        return Some(days);
    }

    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}

pub(crate) fn parse_case(row: &RowView<'_>) -> Result<Case, ScoringError> {
    let case_id = CaseId(row.required("case_id")?.to_string());
    let invoice_amount = row.amount("invoice_amount")?;
    let ageing_days = row.days("ageing_days")?;

    let sla_status = row
        .category::<SlaStatus>("sla_status")?
        .unwrap_or_else(|| SlaStatus::for_ageing(ageing_days));

    Ok(Case {
        case_id,
        invoice_amount,
        ageing_days,
        business_type: row.category::<BusinessType>("business_type")?.unwrap_or_default(),
        dispute_status: row
            .category::<DisputeStatus>("dispute_status")?
            .unwrap_or_default(),
        assigned_dca: row.text("assigned_dca").map(str::to_string),
        last_dca_update_days: row.optional_days("last_dca_update_days")?.unwrap_or(0),
        sla_status,
        status: row.category::<CaseStatus>("status")?.unwrap_or_default(),
    })
}

pub(crate) fn parse_model_case(row: &RowView<'_>) -> Result<ModelCase, ScoringError> {
    Ok(ModelCase {
        case_id: CaseId(row.required("case_id")?.to_string()),
        overdue_amount: row.amount("overdue_amount")?,
        days_overdue: row.days("days_overdue")?,
        customer_type: row.required("customer_type")?.to_string(),
        region: row.required("region")?.to_string(),
        past_recovery_rate: row.amount("past_recovery_rate")?,
        dca_experience_score: row.amount("dca_experience_score")?,
        previous_escalations: row.days("previous_escalations")?,
    })
}
