//! Measurement units carried alongside patient values, and the conversions
//! onto the scales the clinical thresholds are written in (kg, m, mg/dL, g/dL).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Molar mass ratio for creatinine: 1 mg/dL = 88.4 µmol/L.
const CREATININE_UMOL_PER_MG_DL: f64 = 88.4;

/// Calcium (40.08 g/mol): 1 mg/dL = 249.5 µmol/L.
const CALCIUM_UMOL_PER_MG_DL: f64 = 249.5;

const KG_PER_LB: f64 = 0.453_592_37;
const M_PER_FT: f64 = 0.3048;
const M_PER_IN: f64 = 0.0254;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum WeightUnit {
    #[default]
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "lb")]
    Pounds,
}

impl WeightUnit {
    pub fn to_kg(self, value: f64) -> f64 {
        match self {
            WeightUnit::Kilograms => value,
            WeightUnit::Pounds => value * KG_PER_LB,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum HeightUnit {
    #[default]
    #[serde(rename = "cm")]
    Centimeters,
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "ft")]
    Feet,
    #[serde(rename = "in")]
    Inches,
}

impl HeightUnit {
    pub fn to_meters(self, value: f64) -> f64 {
        match self {
            HeightUnit::Centimeters => value / 100.0,
            HeightUnit::Meters => value,
            HeightUnit::Feet => value * M_PER_FT,
            HeightUnit::Inches => value * M_PER_IN,
        }
    }
}

/// Units for serum chemistry (creatinine, calcium).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ChemistryUnit {
    #[default]
    #[serde(rename = "MG/DL")]
    MgPerDl,
    #[serde(rename = "MICROMOLES/L")]
    MicromolesPerL,
}

impl ChemistryUnit {
    pub fn creatinine_mg_dl(self, value: f64) -> f64 {
        match self {
            ChemistryUnit::MgPerDl => value,
            ChemistryUnit::MicromolesPerL => value / CREATININE_UMOL_PER_MG_DL,
        }
    }

    pub fn calcium_mg_dl(self, value: f64) -> f64 {
        match self {
            ChemistryUnit::MgPerDl => value,
            ChemistryUnit::MicromolesPerL => value / CALCIUM_UMOL_PER_MG_DL,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum HemoglobinUnit {
    #[default]
    #[serde(rename = "G/DL")]
    GPerDl,
    #[serde(rename = "G/L")]
    GPerL,
}

impl HemoglobinUnit {
    pub fn to_g_dl(self, value: f64) -> f64 {
        match self {
            HemoglobinUnit::GPerDl => value,
            HemoglobinUnit::GPerL => value / 10.0,
        }
    }
}

/// Body-mass index in kg/m², rounded to two decimals.
///
/// Returns `None` when either measurement is missing or the height is not
/// positive.
pub fn bmi(
    weight: Option<f64>,
    weight_unit: WeightUnit,
    height: Option<f64>,
    height_unit: HeightUnit,
) -> Option<f64> {
    let kg = weight_unit.to_kg(weight?);
    let m = height_unit.to_meters(height?);
    if m <= 0.0 {
        return None;
    }
    Some((kg / (m * m) * 100.0).round() / 100.0)
}
