use myeloma_core::error::CoreError;
use myeloma_core::models::patient::Patient;
use myeloma_core::models::units::{self, ChemistryUnit, HeightUnit, HemoglobinUnit, WeightUnit};

fn patient() -> Patient {
    Patient::new("MM-001", "Ada Example", jiff::civil::date(1958, 3, 14))
}

#[test]
fn bmi_converts_units_and_rounds() {
    assert_eq!(
        units::bmi(Some(70.0), WeightUnit::Kilograms, Some(175.0), HeightUnit::Centimeters),
        Some(22.86)
    );
    assert_eq!(
        units::bmi(Some(154.0), WeightUnit::Pounds, Some(69.0), HeightUnit::Inches),
        Some(22.74)
    );
    assert_eq!(units::bmi(None, WeightUnit::Kilograms, Some(1.8), HeightUnit::Meters), None);
    assert_eq!(units::bmi(Some(70.0), WeightUnit::Kilograms, Some(0.0), HeightUnit::Meters), None);
}

#[test]
fn lab_values_normalise_to_threshold_scales() {
    let mut p = patient();
    p.serum_creatinine_level = Some(176.8);
    p.serum_creatinine_level_units = ChemistryUnit::MicromolesPerL;
    p.serum_calcium_level = Some(2994.0);
    p.serum_calcium_level_units = ChemistryUnit::MicromolesPerL;
    p.hemoglobin_level = Some(95.0);
    p.hemoglobin_level_units = HemoglobinUnit::GPerL;

    assert!((p.serum_creatinine_mg_dl().unwrap() - 2.0).abs() < 1e-9);
    assert!((p.serum_calcium_mg_dl().unwrap() - 12.0).abs() < 1e-9);
    assert!((p.hemoglobin_g_dl().unwrap() - 9.5).abs() < 1e-9);
}

#[test]
fn new_patient_defaults() {
    let p = patient();
    assert_eq!(p.karnofsky_performance_score, Some(100));
    assert_eq!(p.disease.as_deref(), Some("multiple myeloma"));
    assert!(!p.has_transplant_history());
    assert_eq!(p.meets_crab, None);
    assert!(p.validate().is_ok());
}

#[test]
fn validate_rejects_out_of_range_scores() {
    let mut p = patient();
    p.ecog_performance_status = Some(6);
    assert!(matches!(
        p.validate(),
        Err(CoreError::OutOfRange { field: "ecog_performance_status", .. })
    ));

    let mut p = patient();
    p.clonal_bone_marrow_plasma_cells_percentage = Some(120.0);
    assert!(p.validate().is_err());

    let mut p = patient();
    p.kappa_flc = Some(-1.0);
    assert!(matches!(
        p.validate(),
        Err(CoreError::OutOfRange { field: "kappa_flc", .. })
    ));
}

#[test]
fn validate_rejects_bad_identity() {
    let p = Patient::new("   ", "Ada Example", jiff::civil::date(1958, 3, 14));
    assert!(matches!(p.validate(), Err(CoreError::MissingField(_))));

    let p = Patient::new("X".repeat(21), "Ada Example", jiff::civil::date(1958, 3, 14));
    assert!(matches!(p.validate(), Err(CoreError::InvalidField { .. })));
}

#[test]
fn units_use_wire_names() {
    assert_eq!(serde_json::to_string(&ChemistryUnit::MicromolesPerL).unwrap(), "\"MICROMOLES/L\"");
    assert_eq!(serde_json::to_string(&HemoglobinUnit::GPerL).unwrap(), "\"G/L\"");
    let unit: HeightUnit = serde_json::from_str("\"ft\"").unwrap();
    assert_eq!(unit, HeightUnit::Feet);
}
