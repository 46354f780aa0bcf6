use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::units::{self, ChemistryUnit, HeightUnit, HemoglobinUnit, WeightUnit};
use crate::error::CoreError;

pub const DEFAULT_DISEASE: &str = "multiple myeloma";

const PATIENT_ID_MAX_LEN: usize = 20;
const NAME_MAX_LEN: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "UN")]
    Unknown,
    #[serde(rename = "")]
    Empty,
}

/// Clinical-state snapshot of one patient.
///
/// Updated in place; there is no field history. `meets_crab` and `meets_slim`
/// are derived and are rewritten by the engine whenever the lab inputs change
/// or a diagnostic is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub patient_id: String,
    pub name: String,
    pub date_of_birth: jiff::civil::Date,
    pub gender: Option<Gender>,

    // Disease block
    pub weight: Option<f64>,
    #[serde(default)]
    pub weight_units: WeightUnit,
    pub height: Option<f64>,
    #[serde(default)]
    pub height_units: HeightUnit,
    /// Computed from weight and height; never accepted from input.
    pub bmi: Option<f64>,
    pub disease: Option<String>,
    pub karnofsky_performance_score: Option<u8>,
    pub ecog_performance_status: Option<u8>,
    pub peripheral_neuropathy_grade: Option<u8>,
    /// Comma-separated, e.g. `"del17p, t(4;14)"`.
    pub cytogenic_markers: Option<String>,
    #[serde(default)]
    pub stem_cell_transplant_history: Vec<String>,
    pub progression: Option<String>,

    // Treatment block
    pub treatment_refractory_status: Option<String>,

    // Blood block
    pub serum_calcium_level: Option<f64>,
    #[serde(default)]
    pub serum_calcium_level_units: ChemistryUnit,
    pub creatinine_clearance_rate: Option<f64>,
    pub serum_creatinine_level: Option<f64>,
    #[serde(default)]
    pub serum_creatinine_level_units: ChemistryUnit,
    pub hemoglobin_level: Option<f64>,
    #[serde(default)]
    pub hemoglobin_level_units: HemoglobinUnit,
    pub bone_lesions: Option<String>,
    pub meets_crab: Option<bool>,
    pub clonal_bone_marrow_plasma_cells_percentage: Option<f64>,
    pub kappa_flc: Option<f64>,
    pub lambda_flc: Option<f64>,
    pub meets_slim: Option<bool>,

    // Labs block
    pub beta2_microglobulin: Option<f64>,
    pub lactate_dehydrogenase_level: Option<f64>,
    pub bone_imaging_result: Option<String>,

    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Patient {
    pub fn new(
        patient_id: impl Into<String>,
        name: impl Into<String>,
        date_of_birth: jiff::civil::Date,
    ) -> Self {
        let now = jiff::Timestamp::now();
        Self {
            patient_id: patient_id.into(),
            name: name.into(),
            date_of_birth,
            gender: None,
            weight: None,
            weight_units: WeightUnit::default(),
            height: None,
            height_units: HeightUnit::default(),
            bmi: None,
            disease: Some(DEFAULT_DISEASE.to_string()),
            karnofsky_performance_score: Some(100),
            ecog_performance_status: None,
            peripheral_neuropathy_grade: None,
            cytogenic_markers: None,
            stem_cell_transplant_history: Vec::new(),
            progression: None,
            treatment_refractory_status: None,
            serum_calcium_level: None,
            serum_calcium_level_units: ChemistryUnit::default(),
            creatinine_clearance_rate: None,
            serum_creatinine_level: None,
            serum_creatinine_level_units: ChemistryUnit::default(),
            hemoglobin_level: None,
            hemoglobin_level_units: HemoglobinUnit::default(),
            bone_lesions: None,
            meets_crab: None,
            clonal_bone_marrow_plasma_cells_percentage: None,
            kappa_flc: None,
            lambda_flc: None,
            meets_slim: None,
            beta2_microglobulin: None,
            lactate_dehydrogenase_level: None,
            bone_imaging_result: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Serum creatinine on the mg/dL scale.
    pub fn serum_creatinine_mg_dl(&self) -> Option<f64> {
        self.serum_creatinine_level
            .map(|v| self.serum_creatinine_level_units.creatinine_mg_dl(v))
    }

    /// Serum calcium on the mg/dL scale.
    pub fn serum_calcium_mg_dl(&self) -> Option<f64> {
        self.serum_calcium_level
            .map(|v| self.serum_calcium_level_units.calcium_mg_dl(v))
    }

    /// Hemoglobin on the g/dL scale.
    pub fn hemoglobin_g_dl(&self) -> Option<f64> {
        self.hemoglobin_level
            .map(|v| self.hemoglobin_level_units.to_g_dl(v))
    }

    pub fn has_transplant_history(&self) -> bool {
        !self.stem_cell_transplant_history.is_empty()
    }

    pub fn refresh_bmi(&mut self) {
        self.bmi = units::bmi(
            self.weight,
            self.weight_units,
            self.height,
            self.height_units,
        );
    }

    /// Check identity fields and value ranges.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.patient_id.trim().is_empty() {
            return Err(CoreError::MissingField("patient_id".to_string()));
        }
        if self.patient_id.chars().count() > PATIENT_ID_MAX_LEN {
            return Err(CoreError::InvalidField {
                field: "patient_id".to_string(),
                reason: format!("longer than {PATIENT_ID_MAX_LEN} characters"),
            });
        }
        if self.name.trim().is_empty() {
            return Err(CoreError::MissingField("name".to_string()));
        }
        if self.name.chars().count() > NAME_MAX_LEN {
            return Err(CoreError::InvalidField {
                field: "name".to_string(),
                reason: format!("longer than {NAME_MAX_LEN} characters"),
            });
        }

        check_range(
            "karnofsky_performance_score",
            self.karnofsky_performance_score.map(f64::from),
            0.0,
            100.0,
        )?;
        check_range(
            "ecog_performance_status",
            self.ecog_performance_status.map(f64::from),
            0.0,
            5.0,
        )?;
        check_range(
            "peripheral_neuropathy_grade",
            self.peripheral_neuropathy_grade.map(f64::from),
            0.0,
            5.0,
        )?;
        check_range(
            "clonal_bone_marrow_plasma_cells_percentage",
            self.clonal_bone_marrow_plasma_cells_percentage,
            0.0,
            100.0,
        )?;

        let non_negative = [
            ("weight", self.weight),
            ("height", self.height),
            ("serum_calcium_level", self.serum_calcium_level),
            ("creatinine_clearance_rate", self.creatinine_clearance_rate),
            ("serum_creatinine_level", self.serum_creatinine_level),
            ("hemoglobin_level", self.hemoglobin_level),
            ("kappa_flc", self.kappa_flc),
            ("lambda_flc", self.lambda_flc),
            ("beta2_microglobulin", self.beta2_microglobulin),
            ("lactate_dehydrogenase_level", self.lactate_dehydrogenase_level),
        ];
        for (field, value) in non_negative {
            check_range(field, value, 0.0, f64::MAX)?;
        }
        Ok(())
    }
}

/// Reject values outside `[min, max]` and NaN. Missing values pass.
pub(crate) fn check_range(
    field: &'static str,
    value: Option<f64>,
    min: f64,
    max: f64,
) -> Result<(), CoreError> {
    match value {
        Some(v) if v.is_nan() || v < min || v > max => Err(CoreError::OutOfRange {
            field,
            value: v,
            min,
            max,
        }),
        _ => Ok(()),
    }
}
