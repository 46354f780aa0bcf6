//! Treatment recommendations as a rule table.
//!
//! A [`Rule`] is one category of the decision table with its wording for a
//! given framework. Predicates are shared; frameworks differ only in which
//! rules they list, in what order, and how each is phrased.

use std::fmt;
use std::str::FromStr;

use myeloma_core::models::patient::Patient;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::RuleError;

pub const ECOG_FIT_MAX: u8 = 2;
pub const KARNOFSKY_FIT_MIN: u8 = 70;
pub const KARNOFSKY_FRAIL_BELOW: u8 = 60;
pub const NEUROPATHY_GRADE_MIN: u8 = 2;
/// Serum creatinine (mg/dL) above which doses are adjusted.
pub const RENAL_CREATININE_MG_DL: f64 = 2.0;

pub const TRANSPLANT_PERFORMED: &str = "Stem cell transplant already performed.";

const HIGH_RISK_MARKERS: [&str; 3] = ["del17p", "t(4;14)", "t(14;16)"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Framework {
    #[default]
    Consensus,
    Nice,
    Nccn,
}

impl Framework {
    /// Resolve a caller-supplied selector. Matching is case-insensitive and
    /// anything unrecognised falls back to the consensus framework.
    pub fn from_selector(selector: Option<&str>) -> Self {
        selector
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Consensus => "consensus",
            Framework::Nice => "nice",
            Framework::Nccn => "nccn",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "consensus" => Ok(Framework::Consensus),
            "nice" => Ok(Framework::Nice),
            "nccn" => Ok(Framework::Nccn),
            _ => Err(RuleError::UnknownFramework(s.to_string())),
        }
    }
}

/// Output of the recommender for one patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TreatmentPlan {
    pub framework: Framework,
    pub recommendations: Vec<String>,
    pub notes: Vec<String>,
    pub next_step: String,
}

/// What a single rule contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Recommendation(String),
    Note(String),
}

/// One row of a guideline's decision table.
///
/// `Refractory` notes may contain `{status}`, replaced with the patient's
/// refractory-status text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// First match wins: ECOG ≤ 2 (when `ecog` is set), then Karnofsky ≥ 70,
    /// then `fallback`.
    Induction {
        ecog: Option<&'static str>,
        karnofsky: &'static str,
        fallback: &'static str,
    },
    /// Without transplant history, branch on eligibility. With history, note
    /// it and stop.
    Transplant {
        eligible: &'static str,
        ineligible: &'static str,
    },
    CytogeneticRisk {
        high_risk: &'static str,
        standard_risk: &'static str,
    },
    /// Always fires: systemic therapy if CRAB or SLiM is met, otherwise
    /// observation.
    DiseaseActivity {
        active: &'static str,
        inactive: &'static str,
    },
    RenalImpairment { recommendation: &'static str },
    Refractory { note: &'static str },
    Progression { recommendation: &'static str },
    Neuropathy { recommendation: &'static str },
    Frailty { recommendation: &'static str },
}

impl Rule {
    pub fn apply(&self, patient: &Patient) -> Option<Entry> {
        match *self {
            Rule::Induction {
                ecog,
                karnofsky,
                fallback,
            } => {
                let text = match ecog {
                    Some(text) if ecog_fit(patient) => text,
                    _ if karnofsky_fit(patient) => karnofsky,
                    _ => fallback,
                };
                Some(recommend(text))
            }
            Rule::Transplant {
                eligible,
                ineligible,
            } => {
                if patient.has_transplant_history() {
                    Some(Entry::Note(TRANSPLANT_PERFORMED.to_string()))
                } else if transplant_eligible(patient) {
                    Some(recommend(eligible))
                } else {
                    Some(recommend(ineligible))
                }
            }
            Rule::CytogeneticRisk {
                high_risk,
                standard_risk,
            } => {
                let markers = present(patient.cytogenic_markers.as_deref())?;
                if has_high_risk_marker(markers) {
                    Some(recommend(high_risk))
                } else {
                    Some(Entry::Note(standard_risk.to_string()))
                }
            }
            Rule::DiseaseActivity { active, inactive } => {
                let active_disease = patient.meets_crab.unwrap_or(false)
                    || patient.meets_slim.unwrap_or(false);
                Some(recommend(if active_disease { active } else { inactive }))
            }
            Rule::RenalImpairment { recommendation } => patient
                .serum_creatinine_mg_dl()
                .is_some_and(|v| v > RENAL_CREATININE_MG_DL)
                .then(|| recommend(recommendation)),
            Rule::Refractory { note } => {
                let status = present(patient.treatment_refractory_status.as_deref())?;
                Some(Entry::Note(note.replace("{status}", status)))
            }
            Rule::Progression { recommendation } => present(patient.progression.as_deref())
                .is_some_and(|p| p.to_lowercase().contains("progression"))
                .then(|| recommend(recommendation)),
            Rule::Neuropathy { recommendation } => patient
                .peripheral_neuropathy_grade
                .is_some_and(|g| g >= NEUROPATHY_GRADE_MIN)
                .then(|| recommend(recommendation)),
            Rule::Frailty { recommendation } => patient
                .karnofsky_performance_score
                .is_some_and(|k| k < KARNOFSKY_FRAIL_BELOW)
                .then(|| recommend(recommendation)),
        }
    }
}

/// Karnofsky ≥ 70 or ECOG ≤ 2.
pub fn transplant_eligible(patient: &Patient) -> bool {
    karnofsky_fit(patient) || ecog_fit(patient)
}

fn ecog_fit(patient: &Patient) -> bool {
    patient
        .ecog_performance_status
        .is_some_and(|e| e <= ECOG_FIT_MAX)
}

fn karnofsky_fit(patient: &Patient) -> bool {
    patient
        .karnofsky_performance_score
        .is_some_and(|k| k >= KARNOFSKY_FIT_MIN)
}

/// Split a comma-separated marker string and match tokens case-insensitively.
pub fn has_high_risk_marker(markers: &str) -> bool {
    markers
        .split(',')
        .map(|token| token.trim().to_lowercase())
        .any(|token| HIGH_RISK_MARKERS.contains(&token.as_str()))
}

fn present(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

fn recommend(text: &str) -> Entry {
    Entry::Recommendation(text.to_string())
}
