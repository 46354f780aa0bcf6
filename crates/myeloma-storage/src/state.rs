use std::collections::BTreeMap;
use std::path::Path;

use myeloma_core::models::diagnostic::Diagnostic;
use myeloma_core::models::monitoring::Monitoring;
use myeloma_core::models::patient::Patient;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Everything the store holds. Diagnostics and monitoring records are keyed
/// by the owning patient's id, so deleting the patient drops them too.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub patients: BTreeMap<String, Patient>,
    #[serde(default)]
    pub diagnostics: BTreeMap<String, Vec<Diagnostic>>,
    #[serde(default)]
    pub monitoring: BTreeMap<String, Vec<Monitoring>>,
}

/// Load a JSON snapshot from disk. Returns `None` if the file doesn't exist.
pub fn load_state(path: &Path) -> Result<Option<Database>, StorageError> {
    if !path.exists() {
        return Ok(None);
    }
    let json = std::fs::read(path)?;
    let db: Database = serde_json::from_slice(&json)?;
    tracing::debug!(
        path = %path.display(),
        patients = db.patients.len(),
        "snapshot loaded"
    );
    Ok(Some(db))
}

/// Save a JSON snapshot to disk.
///
/// Written to a temp file then renamed, so a crash mid-write leaves the
/// previous snapshot intact.
pub fn save_state(path: &Path, db: &Database) -> Result<(), StorageError> {
    let json = serde_json::to_vec_pretty(db)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, &json)?;
    std::fs::rename(&tmp_path, path)?;

    tracing::debug!(path = %path.display(), "snapshot flushed to local disk");
    Ok(())
}
