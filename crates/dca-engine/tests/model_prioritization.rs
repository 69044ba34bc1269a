//! Integration specifications for the classifier-backed prioritization path.

use dca_engine::cases::CaseTable;
use dca_engine::decision::{self, PriorityBand};
use dca_engine::error::ScoringError;
use dca_engine::prioritization::{ConfidenceLevel, DcaTier, ModelArtifact, DERIVED_COLUMNS};
use dca_engine::service::{PrioritizationService, ScoredBatch, ScoringPath};
use std::io::Cursor;
use std::sync::Arc;

// Only past_recovery_rate carries weight, so probabilities are easy to reason about.
const ARTIFACT: &str = r#"{
    "classifier": {
        "intercept": -2.0,
        "coefficients": [0.0, 0.0, 0.0, 0.0, 4.0, 0.0, 0.0]
    },
    "encoders": {
        "customer_type": ["Enterprise", "SME"],
        "region": ["East", "North", "South", "West"]
    }
}"#;

const MODEL_CSV: &str = "case_id,overdue_amount,days_overdue,customer_type,region,past_recovery_rate,dca_experience_score,previous_escalations\n\
CASE_1000,250000,73,SME,North,0.5,0.7,3\n\
CASE_1001,480000,200,Enterprise,West,1.0,0.9,0\n\
CASE_1002,5000,10,SME,East,0.0,0.2,1\n";

fn service() -> PrioritizationService {
    let artifact = ModelArtifact::from_reader(Cursor::new(ARTIFACT)).expect("artifact loads");
    PrioritizationService::new(Some(Arc::new(artifact)))
}

fn table(csv: &str) -> CaseTable {
    CaseTable::from_reader(Cursor::new(csv.to_string())).expect("case table parses")
}

#[test]
fn classifier_probability_feeds_the_blended_priority() {
    let prioritized = service()
        .prioritize(&table(MODEL_CSV).model_cases().expect("model cases"))
        .expect("known categories");

    // sigmoid(0) for a 0.5 recovery rate
    assert_eq!(prioritized[0].recovery_probability, 0.5);
    assert_eq!(prioritized[0].priority_score, 0.29);
    assert_eq!(prioritized[0].confidence_level, ConfidenceLevel::Medium);
    assert_eq!(prioritized[0].recommended_dca, DcaTier::LowCost);

    // sigmoid(2) = 0.8808
    assert_eq!(prioritized[1].recovery_probability, 0.88);
    assert_eq!(prioritized[1].priority_score, 0.75);
    assert_eq!(prioritized[1].confidence_level, ConfidenceLevel::High);
    assert_eq!(prioritized[1].recommended_dca, DcaTier::TopPerforming);

    // sigmoid(-2) = 0.1192
    assert_eq!(prioritized[2].recovery_probability, 0.12);
    assert_eq!(prioritized[2].confidence_level, ConfidenceLevel::Low);
}

#[test]
fn ranking_and_bands_summarise_the_batch() {
    let prioritized = service()
        .prioritize(&table(MODEL_CSV).model_cases().expect("model cases"))
        .expect("known categories");

    let ranked = decision::ranked(&prioritized);
    let order: Vec<&str> = ranked.iter().map(|case| case.case.case_id.as_str()).collect();
    assert_eq!(order, vec!["CASE_1001", "CASE_1000", "CASE_1002"]);

    let bands = decision::priority_bands(&prioritized);
    assert_eq!(bands.total_cases, 3);
    let high = bands
        .bands
        .iter()
        .find(|entry| entry.band == PriorityBand::High)
        .expect("high band listed");
    assert_eq!(high.cases, 1);
    assert_eq!(high.overdue_total, 480_000.0);
}

#[test]
fn unknown_category_rejects_the_whole_table() {
    let csv = format!("{MODEL_CSV}CASE_1003,1000,5,Government,North,0.4,0.5,0\n");
    let error = service()
        .score_table(ScoringPath::ModelAssisted, &table(&csv))
        .expect_err("unseen customer type");

    assert_eq!(
        error,
        ScoringError::UnknownCategory {
            field: "customer_type".to_string(),
            value: "Government".to_string(),
        }
    );
}

#[test]
fn model_batch_writes_its_own_derived_columns() {
    let source = table(MODEL_CSV);
    let batch = service()
        .score_table(ScoringPath::ModelAssisted, &source)
        .expect("batch scores");
    assert!(matches!(batch, ScoredBatch::ModelAssisted(_)));

    let enriched = batch.enrich(&source);
    for column in DERIVED_COLUMNS {
        assert!(enriched.column(column).is_some(), "missing {column}");
    }
    let tier = enriched.column("recommended_dca").expect("tier column");
    assert_eq!(enriched.rows()[1][tier], "Top Performing DCA");
}

#[test]
fn heuristic_table_is_malformed_for_the_model_schema() {
    let csv = "case_id,invoice_amount,ageing_days\nCASE_1,1000,10\n";
    let error = service()
        .score_table(ScoringPath::ModelAssisted, &table(csv))
        .expect_err("wrong schema");
    assert!(matches!(error, ScoringError::MalformedCase { .. }));
}
