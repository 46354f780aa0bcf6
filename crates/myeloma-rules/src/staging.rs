//! ISS / R-ISS staging from the latest diagnostic.
//!
//! Rules run in a fixed order and later rules overwrite earlier prognosis
//! text: a del(17p) finding wins over an LDH-driven prognosis.

use myeloma_core::models::diagnostic::Diagnostic;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Beta-2 microglobulin above this (mg/L) is ISS stage III.
pub const BETA2_MICROGLOBULIN_HIGH: f64 = 5.5;
/// LDH above this (U/L) is treated as elevated.
pub const LDH_HIGH: f64 = 250.0;
pub const DEL_17P: &str = "del(17p)";

/// Only stages I and III are assigned: stage II needs serum albumin, which
/// the diagnostic panel doesn't carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Stage {
    #[serde(rename = "Stage I")]
    I,
    #[serde(rename = "Stage III")]
    III,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Prognosis {
    #[serde(rename = "Standard risk disease")]
    Standard,
    #[serde(rename = "High-risk disease with poor prognosis")]
    HighRiskPoor,
    #[serde(rename = "High-risk disease due to cytogenetics")]
    HighRiskCytogenetics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Staging {
    pub iss_stage: Stage,
    pub r_iss_stage: Stage,
    pub prognosis: Prognosis,
}

impl Default for Staging {
    fn default() -> Self {
        Self {
            iss_stage: Stage::I,
            r_iss_stage: Stage::I,
            prognosis: Prognosis::Standard,
        }
    }
}

pub fn stage(diagnostic: &Diagnostic) -> Staging {
    let mut staging = Staging::default();

    if diagnostic
        .beta2_microglobulin
        .is_some_and(|v| v > BETA2_MICROGLOBULIN_HIGH)
    {
        staging.iss_stage = Stage::III;
    }

    if diagnostic.ldh.is_some_and(|v| v > LDH_HIGH) {
        staging.r_iss_stage = Stage::III;
        staging.prognosis = Prognosis::HighRiskPoor;
    }

    if diagnostic.cytogenetics().contains(&DEL_17P) {
        staging.prognosis = Prognosis::HighRiskCytogenetics;
    }

    staging
}
