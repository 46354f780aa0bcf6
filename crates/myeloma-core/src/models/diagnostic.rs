use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::patient::{Patient, check_range};
use super::units::{ChemistryUnit, HemoglobinUnit};
use crate::error::CoreError;

/// Key inside `biomarkers` holding the cytogenetic marker list.
pub const CYTOGENETICS: &str = "cytogenetics";

/// Key inside `cbc` holding hemoglobin in g/dL.
pub const CBC_HEMOGLOBIN: &str = "hemoglobin";

/// One diagnostic submission. Append-only; never mutated once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Diagnostic {
    pub id: Uuid,
    pub patient_id: String,
    /// Complete blood count panel, keyed by analyte.
    #[serde(default)]
    pub cbc: BTreeMap<String, serde_json::Value>,
    pub calcium: Option<f64>,
    pub creatinine: Option<f64>,
    pub beta2_microglobulin: Option<f64>,
    pub ldh: Option<f64>,
    #[serde(default)]
    pub imaging_results: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub biomarkers: BTreeMap<String, serde_json::Value>,
    pub submitted_at: jiff::Timestamp,
}

impl Diagnostic {
    /// Cytogenetic markers recorded under `biomarkers.cytogenetics`.
    ///
    /// Non-string entries are skipped; [`Diagnostic::validate`] rejects them
    /// before a record is stored.
    pub fn cytogenetics(&self) -> Vec<&str> {
        match self.biomarkers.get(CYTOGENETICS) {
            Some(serde_json::Value::Array(items)) => {
                items.iter().filter_map(|v| v.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Hemoglobin from the CBC panel, when reported as a number.
    pub fn hemoglobin(&self) -> Option<f64> {
        self.cbc.get(CBC_HEMOGLOBIN).and_then(serde_json::Value::as_f64)
    }

    /// Copy the submitted labs onto the patient's current values.
    ///
    /// Diagnostic labs are on the mg/dL and g/dL scales, so the matching unit
    /// fields are reset alongside. Labs missing from this submission leave
    /// the patient's values as they were.
    pub fn overlay_labs(&self, patient: &mut Patient) {
        if let Some(calcium) = self.calcium {
            patient.serum_calcium_level = Some(calcium);
            patient.serum_calcium_level_units = ChemistryUnit::MgPerDl;
        }
        if let Some(creatinine) = self.creatinine {
            patient.serum_creatinine_level = Some(creatinine);
            patient.serum_creatinine_level_units = ChemistryUnit::MgPerDl;
        }
        if let Some(hemoglobin) = self.hemoglobin() {
            patient.hemoglobin_level = Some(hemoglobin);
            patient.hemoglobin_level_units = HemoglobinUnit::GPerDl;
        }
        if self.beta2_microglobulin.is_some() {
            patient.beta2_microglobulin = self.beta2_microglobulin;
        }
        if self.ldh.is_some() {
            patient.lactate_dehydrogenase_level = self.ldh;
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        match self.biomarkers.get(CYTOGENETICS) {
            None | Some(serde_json::Value::Null) => {}
            Some(serde_json::Value::Array(items)) => {
                if let Some(bad) = items.iter().find(|v| !v.is_string()) {
                    return Err(CoreError::InvalidField {
                        field: format!("biomarkers.{CYTOGENETICS}"),
                        reason: format!("expected marker strings, found {bad}"),
                    });
                }
            }
            Some(other) => {
                return Err(CoreError::InvalidField {
                    field: format!("biomarkers.{CYTOGENETICS}"),
                    reason: format!("expected a list, found {other}"),
                });
            }
        }

        check_range("calcium", self.calcium, 0.0, f64::MAX)?;
        check_range("creatinine", self.creatinine, 0.0, f64::MAX)?;
        check_range("beta2_microglobulin", self.beta2_microglobulin, 0.0, f64::MAX)?;
        check_range("ldh", self.ldh, 0.0, f64::MAX)?;
        check_range("cbc.hemoglobin", self.hemoglobin(), 0.0, f64::MAX)?;
        Ok(())
    }
}
