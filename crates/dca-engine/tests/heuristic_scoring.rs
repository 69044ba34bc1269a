//! Integration specifications for the rule-based scoring path.
//!
//! Scenarios run CSV tables through the public service facade so import defaults,
//! derived columns and batch failure semantics are exercised together.

mod common {
    use dca_engine::cases::CaseTable;
    use std::io::Cursor;

    pub(super) const PORTFOLIO_CSV: &str = "case_id,invoice_amount,ageing_days,business_type,dispute_status,assigned_dca,last_dca_update_days,sla_status,status,region\n\
CASE_1,100000,30,Medium,None,DCA Agent 1,0,OK,ACTIVE,North\n\
CASE_2,600000,200,Small,None,DCA Agent 2,0,OK,ACTIVE,South\n\
CASE_3,300000,200,Small,Pending_Resolution,DCA Agent 1,10,AT_RISK,ACTIVE,East\n\
CASE_4,40000,20,Medium,Open,DCA Agent 2,0,BREACHED,ACTIVE,West\n\
CASE_5,80000,45,Large,Resolved,,16,OK,PENDING_REVIEW,North\n";

    pub(super) fn table(csv: &str) -> CaseTable {
        CaseTable::from_reader(Cursor::new(csv.to_string())).expect("case table parses")
    }
}

use common::*;
use dca_engine::error::ScoringError;
use dca_engine::scoring::{NextAction, RiskLevel, DERIVED_COLUMNS};
use dca_engine::service::{PrioritizationService, ScoredBatch, ScoringPath};

fn score(csv: &str) -> Vec<dca_engine::scoring::ScoredCase> {
    match PrioritizationService::default()
        .score_table(ScoringPath::Heuristic, &table(csv))
        .expect("batch scores")
    {
        ScoredBatch::Heuristic(scored) => scored,
        ScoredBatch::ModelAssisted(_) => panic!("heuristic path returned model results"),
    }
}

#[test]
fn regression_case_is_pinned_end_to_end() {
    let scored = score(PORTFOLIO_CSV);
    let regression = &scored[1];

    assert_eq!(regression.recovery_score, 0.772);
    assert_eq!(regression.recovery_probability, 46.3);
    assert_eq!(regression.churn_risk, 60.0);
    assert_eq!(regression.priority_score, 977_867.0);
    assert_eq!(regression.expected_recovery, 277_800.0);
    assert_eq!(regression.risk_level, RiskLevel::High);
    assert_eq!(regression.next_action, NextAction::EscalateToLegal);
}

#[test]
fn next_actions_follow_rule_precedence() {
    let scored = score(PORTFOLIO_CSV);
    let actions: Vec<NextAction> = scored.iter().map(|case| case.next_action).collect();

    assert_eq!(
        actions,
        vec![
            NextAction::AggressiveFollowUp,
            NextAction::EscalateToLegal,
            NextAction::SettlementReview,
            NextAction::ResolveDispute,
            NextAction::EscalateUnresponsiveDca,
        ]
    );
    assert_eq!(scored[3].next_action.label(), "Resolve Dispute First");
}

#[test]
fn stale_agent_forces_next_day_follow_up() {
    let scored = score(PORTFOLIO_CSV);
    assert_eq!(scored[4].optimal_followup_days, 1);
}

#[test]
fn derived_fields_stay_within_bounds() {
    for scored in score(PORTFOLIO_CSV) {
        assert!((0.0..=1.0).contains(&scored.recovery_score));
        assert!((0.0..=100.0).contains(&scored.recovery_probability));
        assert!((0.0..=100.0).contains(&scored.churn_risk));
        assert!(scored.priority_score >= 0.0);
        assert!(scored.expected_recovery <= scored.case.invoice_amount);
        assert!(scored.optimal_followup_days >= 1);
    }
}

#[test]
fn enriched_table_keeps_unknown_columns_and_appends_derived_ones() {
    let source = table(PORTFOLIO_CSV);
    let batch = PrioritizationService::default()
        .score_table(ScoringPath::Heuristic, &source)
        .expect("batch scores");
    let enriched = batch.enrich(&source);

    let region = enriched.column("region").expect("region survives");
    assert_eq!(enriched.rows()[2][region], "East");
    for column in DERIVED_COLUMNS {
        assert!(enriched.column(column).is_some(), "missing {column}");
    }
    assert_eq!(enriched.headers().len(), source.headers().len() + DERIVED_COLUMNS.len());
}

#[test]
fn rescoring_an_enriched_table_overwrites_in_place() {
    let source = table(PORTFOLIO_CSV);
    let service = PrioritizationService::default();
    let first = service
        .score_table(ScoringPath::Heuristic, &source)
        .expect("first pass")
        .enrich(&source);
    let second = service
        .score_table(ScoringPath::Heuristic, &first)
        .expect("second pass")
        .enrich(&first);

    assert_eq!(first, second);
}

#[test]
fn one_malformed_row_fails_the_whole_batch() {
    let csv = "case_id,invoice_amount,ageing_days\nCASE_1,1000,10\nCASE_2,1000,soon\n";
    let error = PrioritizationService::default()
        .score_table(ScoringPath::Heuristic, &table(csv))
        .expect_err("bad ageing");

    match error {
        ScoringError::MalformedCase { case_id, reason } => {
            assert_eq!(case_id, "CASE_2");
            assert!(reason.contains("ageing_days"));
        }
        other => panic!("expected malformed case, got {other:?}"),
    }
}

#[test]
fn zero_invoice_is_not_an_error() {
    let scored = score("case_id,invoice_amount,ageing_days\nCASE_0,0,10\n");
    assert_eq!(scored[0].priority_score, 0.0);
    assert_eq!(scored[0].expected_recovery, 0.0);
}
