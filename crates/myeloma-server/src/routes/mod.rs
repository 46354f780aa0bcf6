pub mod diagnostics;
pub mod guidelines;
pub mod health;
pub mod monitoring;
pub mod patients;
pub mod treatment;

use myeloma_engine::{Engine, EngineError, payload};
use myeloma_storage::MemoryStore;
use serde::de::DeserializeOwned;

/// Parse a JSON body addressed to an existing patient.
///
/// Bodies are taken as raw bytes and parsed here, so a malformed body or a
/// missing content type is reported as an invalid payload. The patient is
/// looked up first; an unknown id is not found whatever the body holds.
pub(crate) fn patient_body<T: DeserializeOwned>(
    engine: &Engine<MemoryStore>,
    patient_id: &str,
    body: &[u8],
) -> Result<T, EngineError> {
    engine.patient(patient_id)?;
    payload::parse_slice(body)
}
