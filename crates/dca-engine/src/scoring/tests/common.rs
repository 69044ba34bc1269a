use crate::cases::{BusinessType, Case, DisputeStatus, SlaStatus};

/// Mid-sized, recently active, undisputed case that scores comfortably high.
pub(super) fn healthy_case() -> Case {
    Case::new("CASE_1", 100_000.0, 30)
}

/// The large, old Small-segment case used to pin the exact arithmetic.
pub(super) fn regression_case() -> Case {
    Case::new("CASE_REG", 600_000.0, 200)
        .with_business_type(BusinessType::Small)
        .with_dispute_status(DisputeStatus::None)
        .with_last_dca_update_days(0)
        .with_sla_status(SlaStatus::Ok)
}

pub(super) fn disputed_breached_case() -> Case {
    Case::new("CASE_BLOCKED", 80_000.0, 45)
        .with_dispute_status(DisputeStatus::Open)
        .with_last_dca_update_days(20)
        .with_sla_status(SlaStatus::Breached)
}

/// Every combination of categorical inputs over a spread of numeric values.
pub(super) fn case_grid() -> Vec<Case> {
    let disputes = [
        DisputeStatus::None,
        DisputeStatus::Open,
        DisputeStatus::PendingResolution,
        DisputeStatus::Resolved,
    ];
    let updates = [0, 10, 15, 22, 60];
    let ageing = [0, 45, 90, 150, 200, 400];
    let invoices = [0.0, 1_000.0, 300_000.0, 2_000_000.0];

    let mut cases = Vec::new();
    for business_type in BusinessType::ordered() {
        for dispute_status in disputes {
            for sla_status in SlaStatus::ordered() {
                for last_update in updates {
                    for days in ageing {
                        for invoice in invoices {
                            let case_id = format!("GRID_{}", cases.len());
                            cases.push(
                                Case::new(case_id, invoice, days)
                                    .with_business_type(business_type)
                                    .with_dispute_status(dispute_status)
                                    .with_sla_status(sla_status)
                                    .with_last_dca_update_days(last_update),
                            );
                        }
                    }
                }
            }
        }
    }
    cases
}
