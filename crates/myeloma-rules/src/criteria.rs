//! IMWG SLiM-CRAB criteria.
//!
//! Each criterion is evaluated on its own. A missing input makes that
//! criterion false; it is never an error.

use myeloma_core::models::patient::Patient;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Serum calcium above this (mg/dL) is hypercalcemia.
pub const CALCIUM_MG_DL: f64 = 11.0;
/// Serum creatinine above this (mg/dL) is renal insufficiency.
pub const CREATININE_MG_DL: f64 = 2.0;
/// Creatinine clearance below this (mL/min) is renal insufficiency.
pub const CREATININE_CLEARANCE_ML_MIN: f64 = 40.0;
/// Hemoglobin below this (g/dL) is anemia.
pub const HEMOGLOBIN_G_DL: f64 = 10.0;
/// Clonal bone-marrow plasma cells at or above this percentage.
pub const PLASMA_CELLS_PERCENT: f64 = 60.0;
/// Involved/uninvolved free light chain ratio at or above this.
pub const LIGHT_CHAIN_RATIO: f64 = 100.0;

/// CRAB end-organ damage, one flag per criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CrabCriteria {
    pub calcium: bool,
    pub renal: bool,
    pub anemia: bool,
    pub bone: bool,
}

impl CrabCriteria {
    pub fn evaluate(patient: &Patient) -> Self {
        let renal = patient
            .serum_creatinine_mg_dl()
            .is_some_and(|v| v > CREATININE_MG_DL)
            || patient
                .creatinine_clearance_rate
                .is_some_and(|v| v < CREATININE_CLEARANCE_ML_MIN);

        Self {
            calcium: patient
                .serum_calcium_mg_dl()
                .is_some_and(|v| v > CALCIUM_MG_DL),
            renal,
            anemia: patient
                .hemoglobin_g_dl()
                .is_some_and(|v| v < HEMOGLOBIN_G_DL),
            bone: has_bone_lesions(patient.bone_lesions.as_deref()),
        }
    }

    pub fn any(&self) -> bool {
        self.calcium || self.renal || self.anemia || self.bone
    }
}

/// SLiM biomarkers of imminent organ damage, one flag per criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SlimCriteria {
    pub plasma_cells: bool,
    pub light_chain_ratio: bool,
    pub imaging: bool,
}

impl SlimCriteria {
    pub fn evaluate(patient: &Patient) -> Self {
        let light_chain_ratio = match (patient.kappa_flc, patient.lambda_flc) {
            (Some(kappa), Some(lambda)) => light_chain_ratio(kappa, lambda) >= LIGHT_CHAIN_RATIO,
            _ => false,
        };

        let imaging = patient
            .bone_imaging_result
            .as_deref()
            .is_some_and(|flag| flag.trim().eq_ignore_ascii_case("yes"))
            && matches!(patient.bone_lesions.as_deref(), Some("2" | "more than 2"));

        Self {
            plasma_cells: patient
                .clonal_bone_marrow_plasma_cells_percentage
                .is_some_and(|v| v >= PLASMA_CELLS_PERCENT),
            light_chain_ratio,
            imaging,
        }
    }

    pub fn any(&self) -> bool {
        self.plasma_cells || self.light_chain_ratio || self.imaging
    }
}

/// Result of evaluating both criteria sets for one patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CriteriaOutcome {
    pub meets_crab: bool,
    pub meets_slim: bool,
    pub crab_criteria: CrabCriteria,
    pub slim_criteria: SlimCriteria,
}

impl CriteriaOutcome {
    /// Overwrite the derived flags on `patient` with this outcome.
    pub fn apply_to(&self, patient: &mut Patient) {
        patient.meets_crab = Some(self.meets_crab);
        patient.meets_slim = Some(self.meets_slim);
    }
}

pub fn evaluate(patient: &Patient) -> CriteriaOutcome {
    let crab_criteria = CrabCriteria::evaluate(patient);
    let slim_criteria = SlimCriteria::evaluate(patient);
    CriteriaOutcome {
        meets_crab: crab_criteria.any(),
        meets_slim: slim_criteria.any(),
        crab_criteria,
        slim_criteria,
    }
}

/// The larger of kappa/lambda and lambda/kappa. Each denominator is floored
/// at 1, so a zero count never divides.
pub fn light_chain_ratio(kappa: f64, lambda: f64) -> f64 {
    let kappa_to_lambda = kappa / lambda.max(1.0);
    let lambda_to_kappa = lambda / kappa.max(1.0);
    kappa_to_lambda.max(lambda_to_kappa)
}

fn has_bone_lesions(descriptor: Option<&str>) -> bool {
    match descriptor.map(|d| d.trim().to_lowercase()) {
        Some(d) => !d.is_empty() && d != "0" && d != "none",
        None => false,
    }
}
