//! Storage key conventions.
//!
//! Pure string functions. These name records in storage errors, so a missing
//! record reads the same at every layer.

pub fn patient(patient_id: &str) -> String {
    format!("patients/{patient_id}")
}

pub fn latest_diagnostic(patient_id: &str) -> String {
    format!("patients/{patient_id}/diagnostics/latest")
}
