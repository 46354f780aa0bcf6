//! Typed request payloads.
//!
//! Every payload is parsed from JSON before any rule runs. Unknown keys and
//! wrong types are rejected as [`EngineError::InvalidPayload`]; value ranges
//! are checked on the resulting records.

use std::collections::BTreeMap;

use myeloma_core::models::patient::{Gender, Patient};
use myeloma_core::models::units::{ChemistryUnit, HeightUnit, HemoglobinUnit, WeightUnit};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::EngineError;

const MRD_STATUS_MAX_LEN: usize = 50;

/// Parse a raw JSON body into a typed payload.
pub fn parse<T: DeserializeOwned>(value: Value) -> Result<T, EngineError> {
    Ok(serde_json::from_value(value)?)
}

/// Parse a request body straight from bytes.
pub fn parse_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, EngineError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewPatient {
    pub patient_id: String,
    pub name: String,
    pub date_of_birth: jiff::civil::Date,
    /// Initial clinical profile, same shape as a profile update.
    #[serde(default)]
    pub clinical: Option<ProfileUpdate>,
}

/// Bone imaging result as either a boolean or free text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ImagingFlag {
    Bool(bool),
    Text(String),
}

impl From<ImagingFlag> for String {
    fn from(flag: ImagingFlag) -> Self {
        match flag {
            ImagingFlag::Bool(true) => "yes".to_string(),
            ImagingFlag::Bool(false) => "no".to_string(),
            ImagingFlag::Text(text) => text,
        }
    }
}

/// Clinical fields to overwrite on a patient.
///
/// An absent field is left unchanged. For fields the patient holds as
/// optional, an explicit `null` clears the stored value. Unit fields and the
/// transplant history always hold a value, so `null` leaves them unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileUpdate {
    #[serde(default, deserialize_with = "clearable")]
    pub gender: Option<Option<Gender>>,
    #[serde(default, deserialize_with = "clearable")]
    pub weight: Option<Option<f64>>,
    pub weight_units: Option<WeightUnit>,
    #[serde(default, deserialize_with = "clearable")]
    pub height: Option<Option<f64>>,
    pub height_units: Option<HeightUnit>,
    #[serde(default, deserialize_with = "clearable")]
    pub disease: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable_score")]
    pub karnofsky_performance_score: Option<Option<u8>>,
    #[serde(default, deserialize_with = "clearable_score")]
    pub ecog_performance_status: Option<Option<u8>>,
    #[serde(default, deserialize_with = "clearable_score")]
    pub peripheral_neuropathy_grade: Option<Option<u8>>,
    #[serde(default, deserialize_with = "clearable")]
    pub cytogenic_markers: Option<Option<String>>,
    pub stem_cell_transplant_history: Option<Vec<String>>,
    #[serde(default, deserialize_with = "clearable")]
    pub progression: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable")]
    pub treatment_refractory_status: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable")]
    pub serum_calcium_level: Option<Option<f64>>,
    pub serum_calcium_level_units: Option<ChemistryUnit>,
    #[serde(default, deserialize_with = "clearable")]
    pub creatinine_clearance_rate: Option<Option<f64>>,
    #[serde(default, deserialize_with = "clearable")]
    pub serum_creatinine_level: Option<Option<f64>>,
    pub serum_creatinine_level_units: Option<ChemistryUnit>,
    #[serde(default, deserialize_with = "clearable")]
    pub hemoglobin_level: Option<Option<f64>>,
    pub hemoglobin_level_units: Option<HemoglobinUnit>,
    #[serde(default, deserialize_with = "clearable")]
    pub bone_lesions: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable")]
    pub bone_imaging_result: Option<Option<ImagingFlag>>,
    #[serde(default, deserialize_with = "clearable")]
    pub clonal_bone_marrow_plasma_cells_percentage: Option<Option<f64>>,
    #[serde(default, deserialize_with = "clearable")]
    pub kappa_flc: Option<Option<f64>>,
    #[serde(default, deserialize_with = "clearable")]
    pub lambda_flc: Option<Option<f64>>,
    #[serde(default, deserialize_with = "clearable")]
    pub beta2_microglobulin: Option<Option<f64>>,
    #[serde(default, deserialize_with = "clearable")]
    pub lactate_dehydrogenase_level: Option<Option<f64>>,
}

/// Present-and-null becomes `Some(None)`; absence falls back to `None` via
/// `#[serde(default)]`.
fn clearable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Like [`clearable`], for whole-number scores sent as integers or as
/// integral floats (`80` or `80.0`).
fn clearable_score<'de, D>(deserializer: D) -> Result<Option<Option<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    let score = Option::<f64>::deserialize(deserializer)?
        .map(|v| {
            if v.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&v) {
                Ok(v as u8)
            } else {
                Err(de::Error::custom(format!(
                    "expected a whole-number score, found {v}"
                )))
            }
        })
        .transpose()?;
    Ok(Some(score))
}

/// Copy each supplied field onto the patient. `optional` fields are
/// `Option`s on the patient too and may be cleared; `set` fields are plain
/// values there.
macro_rules! overwrite {
    ($update:expr, $patient:expr, optional: [$($opt:ident),* $(,)?], set: [$($set:ident),* $(,)?]) => {
        $(
            if let Some(value) = $update.$opt {
                $patient.$opt = value.map(Into::into);
            }
        )*
        $(
            if let Some(value) = $update.$set {
                $patient.$set = value;
            }
        )*
    };
}

impl ProfileUpdate {
    pub fn apply_to(self, patient: &mut Patient) {
        overwrite!(
            self,
            patient,
            optional: [
                gender,
                weight,
                height,
                disease,
                karnofsky_performance_score,
                ecog_performance_status,
                peripheral_neuropathy_grade,
                cytogenic_markers,
                progression,
                treatment_refractory_status,
                serum_calcium_level,
                creatinine_clearance_rate,
                serum_creatinine_level,
                hemoglobin_level,
                bone_lesions,
                bone_imaging_result,
                clonal_bone_marrow_plasma_cells_percentage,
                kappa_flc,
                lambda_flc,
                beta2_microglobulin,
                lactate_dehydrogenase_level,
            ],
            set: [
                weight_units,
                height_units,
                stem_cell_transplant_history,
                serum_calcium_level_units,
                serum_creatinine_level_units,
                hemoglobin_level_units,
            ]
        );
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DiagnosticsPayload {
    #[serde(default)]
    pub lab_results: LabResults,
    #[serde(default)]
    pub imaging_results: BTreeMap<String, Value>,
    #[serde(default)]
    pub biomarkers: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LabResults {
    #[serde(default)]
    pub cbc: BTreeMap<String, Value>,
    pub calcium: Option<f64>,
    pub creatinine: Option<f64>,
    #[serde(alias = "beta2_microglobulin")]
    pub beta2_microglobulin: Option<f64>,
    pub ldh: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MonitoringPayload {
    /// Defaults to today when omitted.
    pub date: Option<jiff::civil::Date>,
    pub m_protein: Option<f64>,
    pub mrd_status: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
}

impl MonitoringPayload {
    pub fn validate(&self) -> Result<(), EngineError> {
        let status = self.mrd_status.trim();
        if status.is_empty() {
            return Err(EngineError::InvalidPayload(
                "mrdStatus must not be empty".to_string(),
            ));
        }
        if status.chars().count() > MRD_STATUS_MAX_LEN {
            return Err(EngineError::InvalidPayload(format!(
                "mrdStatus is longer than {MRD_STATUS_MAX_LEN} characters"
            )));
        }
        if self.m_protein.is_some_and(|v| v.is_nan() || v < 0.0) {
            return Err(EngineError::InvalidPayload(
                "mProtein must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
