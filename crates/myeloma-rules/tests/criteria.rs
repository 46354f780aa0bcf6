use myeloma_core::models::patient::Patient;
use myeloma_core::models::units::{ChemistryUnit, HemoglobinUnit};
use myeloma_rules::criteria::{self, CrabCriteria, SlimCriteria, light_chain_ratio};
use proptest::prelude::*;

fn patient() -> Patient {
    Patient::new("MM-001", "Ada Example", jiff::civil::date(1958, 3, 14))
}

#[test]
fn empty_labs_meet_nothing() {
    let outcome = criteria::evaluate(&patient());
    assert!(!outcome.meets_crab);
    assert!(!outcome.meets_slim);
    assert_eq!(outcome.crab_criteria, CrabCriteria::default());
    assert_eq!(outcome.slim_criteria, SlimCriteria::default());
}

#[test]
fn calcium_threshold_is_strict() {
    let mut p = patient();
    p.serum_calcium_level = Some(11.0);
    assert!(!CrabCriteria::evaluate(&p).calcium);

    p.serum_calcium_level = Some(11.2);
    assert!(CrabCriteria::evaluate(&p).calcium);
}

#[test]
fn renal_fires_on_creatinine_or_clearance() {
    let mut p = patient();
    p.serum_creatinine_level = Some(2.5);
    assert!(CrabCriteria::evaluate(&p).renal);

    let mut p = patient();
    p.creatinine_clearance_rate = Some(35.0);
    assert!(CrabCriteria::evaluate(&p).renal);

    let mut p = patient();
    p.serum_creatinine_level = Some(1.1);
    p.creatinine_clearance_rate = Some(80.0);
    assert!(!CrabCriteria::evaluate(&p).renal);
}

#[test]
fn si_units_are_converted_before_thresholds() {
    let mut p = patient();
    // 221 µmol/L = 2.5 mg/dL
    p.serum_creatinine_level = Some(221.0);
    p.serum_creatinine_level_units = ChemistryUnit::MicromolesPerL;
    // 95 g/L = 9.5 g/dL
    p.hemoglobin_level = Some(95.0);
    p.hemoglobin_level_units = HemoglobinUnit::GPerL;
    // 2994 µmol/L = 12 mg/dL
    p.serum_calcium_level = Some(2994.0);
    p.serum_calcium_level_units = ChemistryUnit::MicromolesPerL;

    let crab = CrabCriteria::evaluate(&p);
    assert!(crab.renal);
    assert!(crab.anemia);
    assert!(crab.calcium);

    // 120 g/L = 12 g/dL
    p.hemoglobin_level = Some(120.0);
    assert!(!CrabCriteria::evaluate(&p).anemia);
}

#[test]
fn bone_descriptor_none_or_zero_is_not_a_lesion() {
    for descriptor in ["0", "none", "None", " NONE ", ""] {
        let mut p = patient();
        p.bone_lesions = Some(descriptor.to_string());
        assert!(!CrabCriteria::evaluate(&p).bone, "descriptor {descriptor:?}");
    }

    let mut p = patient();
    p.bone_lesions = Some("1".to_string());
    assert!(CrabCriteria::evaluate(&p).bone);
}

#[test]
fn light_chain_ratio_examples() {
    assert_eq!(light_chain_ratio(500.0, 1.0), 500.0);
    assert!(light_chain_ratio(50.0, 60.0) < 100.0);

    let mut p = patient();
    p.kappa_flc = Some(500.0);
    p.lambda_flc = Some(1.0);
    assert!(SlimCriteria::evaluate(&p).light_chain_ratio);

    p.kappa_flc = Some(50.0);
    p.lambda_flc = Some(60.0);
    assert!(!SlimCriteria::evaluate(&p).light_chain_ratio);
}

#[test]
fn light_chain_ratio_guards_zero_and_works_both_ways() {
    assert_eq!(light_chain_ratio(150.0, 0.0), 150.0);
    assert_eq!(light_chain_ratio(0.0, 0.0), 0.0);

    let mut p = patient();
    p.kappa_flc = Some(2.0);
    p.lambda_flc = Some(400.0);
    assert!(SlimCriteria::evaluate(&p).light_chain_ratio);

    p.kappa_flc = None;
    assert!(!SlimCriteria::evaluate(&p).light_chain_ratio);
}

#[test]
fn plasma_cell_threshold_is_inclusive() {
    let mut p = patient();
    p.clonal_bone_marrow_plasma_cells_percentage = Some(60.0);
    assert!(SlimCriteria::evaluate(&p).plasma_cells);

    p.clonal_bone_marrow_plasma_cells_percentage = Some(59.9);
    assert!(!SlimCriteria::evaluate(&p).plasma_cells);
}

#[test]
fn imaging_needs_flag_and_lesion_count() {
    let mut p = patient();
    p.bone_imaging_result = Some("YES".to_string());
    p.bone_lesions = Some("more than 2".to_string());
    assert!(SlimCriteria::evaluate(&p).imaging);

    p.bone_lesions = Some("2".to_string());
    assert!(SlimCriteria::evaluate(&p).imaging);

    p.bone_lesions = Some("1".to_string());
    assert!(!SlimCriteria::evaluate(&p).imaging);

    p.bone_lesions = Some("2".to_string());
    p.bone_imaging_result = Some("no".to_string());
    assert!(!SlimCriteria::evaluate(&p).imaging);
}

#[test]
fn apply_to_overwrites_flags() {
    let mut p = patient();
    p.meets_crab = Some(true);
    p.meets_slim = Some(true);

    criteria::evaluate(&p).apply_to(&mut p);

    assert_eq!(p.meets_crab, Some(false));
    assert_eq!(p.meets_slim, Some(false));
}

proptest! {
    #[test]
    fn meets_crab_iff_any_criterion(
        calcium in proptest::option::of(5.0f64..15.0),
        creatinine in proptest::option::of(0.3f64..5.0),
        clearance in proptest::option::of(10.0f64..120.0),
        hemoglobin in proptest::option::of(6.0f64..16.0),
        lesions in proptest::option::of(prop_oneof![
            Just("0".to_string()),
            Just("none".to_string()),
            Just("1".to_string()),
            Just("more than 2".to_string()),
        ]),
    ) {
        let mut p = patient();
        p.serum_calcium_level = calcium;
        p.serum_creatinine_level = creatinine;
        p.creatinine_clearance_rate = clearance;
        p.hemoglobin_level = hemoglobin;
        p.bone_lesions = lesions.clone();

        let outcome = criteria::evaluate(&p);

        let expected_c = calcium.is_some_and(|v| v > 11.0);
        let expected_r = creatinine.is_some_and(|v| v > 2.0) || clearance.is_some_and(|v| v < 40.0);
        let expected_a = hemoglobin.is_some_and(|v| v < 10.0);
        let expected_b = lesions.is_some_and(|l| l != "0" && l != "none");

        prop_assert_eq!(outcome.crab_criteria.calcium, expected_c);
        prop_assert_eq!(outcome.crab_criteria.renal, expected_r);
        prop_assert_eq!(outcome.crab_criteria.anemia, expected_a);
        prop_assert_eq!(outcome.crab_criteria.bone, expected_b);
        prop_assert_eq!(
            outcome.meets_crab,
            expected_c || expected_r || expected_a || expected_b
        );
    }

    #[test]
    fn meets_slim_iff_any_criterion(
        plasma in proptest::option::of(0.0f64..100.0),
        kappa in proptest::option::of(0.0f64..2000.0),
        lambda in proptest::option::of(0.0f64..2000.0),
    ) {
        let mut p = patient();
        p.clonal_bone_marrow_plasma_cells_percentage = plasma;
        p.kappa_flc = kappa;
        p.lambda_flc = lambda;

        let outcome = criteria::evaluate(&p);
        prop_assert_eq!(outcome.meets_slim, outcome.slim_criteria.any());
        prop_assert!(!outcome.slim_criteria.imaging);
    }
}
