use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A monitoring observation. Purely additive; nothing derives from it yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Monitoring {
    pub id: Uuid,
    pub patient_id: String,
    pub date: jiff::civil::Date,
    pub m_protein: Option<f64>,
    pub mrd_status: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
}
