use std::collections::BTreeMap;

use myeloma_core::models::diagnostic::Diagnostic;
use myeloma_rules::next_tests::{self, BONE_MARROW_BIOPSY, FISH_PANEL};
use myeloma_rules::staging::{self, Prognosis, Stage};
use serde_json::json;
use uuid::Uuid;

fn diagnostic(
    beta2_microglobulin: Option<f64>,
    ldh: Option<f64>,
    biomarkers: serde_json::Value,
) -> Diagnostic {
    let biomarkers: BTreeMap<String, serde_json::Value> =
        serde_json::from_value(biomarkers).unwrap();
    Diagnostic {
        id: Uuid::new_v4(),
        patient_id: "MM-001".to_string(),
        cbc: BTreeMap::new(),
        calcium: None,
        creatinine: None,
        beta2_microglobulin,
        ldh,
        imaging_results: BTreeMap::new(),
        biomarkers,
        submitted_at: jiff::Timestamp::now(),
    }
}

#[test]
fn high_risk_staging_lets_cytogenetics_override_ldh() {
    let d = diagnostic(Some(6.0), Some(300.0), json!({"cytogenetics": ["del(17p)"]}));
    let staging = staging::stage(&d);

    assert_eq!(staging.iss_stage, Stage::III);
    assert_eq!(staging.r_iss_stage, Stage::III);
    assert_eq!(staging.prognosis, Prognosis::HighRiskCytogenetics);

    let body = serde_json::to_value(staging).unwrap();
    assert_eq!(
        body,
        json!({
            "issStage": "Stage III",
            "rIssStage": "Stage III",
            "prognosis": "High-risk disease due to cytogenetics",
        })
    );
}

#[test]
fn standard_risk_staging() {
    let d = diagnostic(Some(3.0), None, json!({"cytogenetics": []}));

    let body = serde_json::to_value(staging::stage(&d)).unwrap();
    assert_eq!(
        body,
        json!({
            "issStage": "Stage I",
            "rIssStage": "Stage I",
            "prognosis": "Standard risk disease",
        })
    );
}

#[test]
fn elevated_ldh_alone_sets_poor_prognosis() {
    let d = diagnostic(None, Some(251.0), json!({"cytogenetics": ["t(4;14)"]}));
    let staging = staging::stage(&d);

    assert_eq!(staging.iss_stage, Stage::I);
    assert_eq!(staging.r_iss_stage, Stage::III);
    assert_eq!(staging.prognosis, Prognosis::HighRiskPoor);
}

#[test]
fn missing_beta2_microglobulin_keeps_stage_one() {
    let d = diagnostic(None, None, json!({}));
    assert_eq!(staging::stage(&d).iss_stage, Stage::I);
}

#[test]
fn empty_biomarkers_ask_for_fish() {
    let d = diagnostic(None, None, json!({}));
    let next = next_tests::recommend(&d);

    assert_eq!(next.recommended_tests, vec![FISH_PANEL]);
    assert_eq!(next.rationale, vec!["High-risk cytogenetics not fully assessed."]);
}

#[test]
fn high_beta2_microglobulin_adds_marrow_biopsy_after_fish() {
    let d = diagnostic(Some(7.0), None, json!({}));
    let next = next_tests::recommend(&d);

    let pairs: Vec<_> = next.pairs().collect();
    assert_eq!(
        pairs,
        vec![
            (FISH_PANEL, "High-risk cytogenetics not fully assessed."),
            (
                BONE_MARROW_BIOPSY,
                "Elevated beta-2 microglobulin requires marrow confirmation."
            ),
        ]
    );
}

#[test]
fn complete_workup_needs_nothing_more() {
    let d = diagnostic(Some(5.5), Some(100.0), json!({"cytogenetics": ["t(11;14)"]}));
    let next = next_tests::recommend(&d);

    assert!(next.recommended_tests.is_empty());
    assert!(next.rationale.is_empty());
    assert_eq!(
        serde_json::to_value(&next).unwrap(),
        json!({"recommendedTests": [], "rationale": []})
    );
}
