use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard};

use myeloma_core::keys;
use myeloma_core::models::diagnostic::Diagnostic;
use myeloma_core::models::monitoring::Monitoring;
use myeloma_core::models::patient::Patient;

use crate::error::StorageError;
use crate::state::{self, Database};
use crate::store::PatientStore;

/// In-process store behind a single `RwLock`.
///
/// When opened with a snapshot path, every mutation is staged on a copy,
/// flushed to disk, and only then made visible. A failed flush leaves the
/// store unchanged.
#[derive(Debug, Default)]
pub struct MemoryStore {
    db: RwLock<Database>,
    path: Option<PathBuf>,
}

impl MemoryStore {
    /// A store that lives only in memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store persisted to `path`, loading the existing snapshot if present.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let db = match state::load_state(&path)? {
            Some(db) => db,
            None => {
                tracing::info!(path = %path.display(), "no snapshot found, starting empty");
                Database::default()
            }
        };
        Ok(Self {
            db: RwLock::new(db),
            path: Some(path),
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Database>, StorageError> {
        self.db.read().map_err(|_| StorageError::LockPoisoned)
    }

    /// Apply `f` under the write lock. `f` must check its preconditions
    /// before touching `db`.
    fn write<T>(
        &self,
        f: impl FnOnce(&mut Database) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let mut db = self.db.write().map_err(|_| StorageError::LockPoisoned)?;
        match &self.path {
            None => f(&mut db),
            Some(path) => {
                let mut staged = db.clone();
                let out = f(&mut staged)?;
                state::save_state(path, &staged)?;
                *db = staged;
                Ok(out)
            }
        }
    }
}

fn require_patient(db: &Database, patient_id: &str) -> Result<(), StorageError> {
    if db.patients.contains_key(patient_id) {
        Ok(())
    } else {
        Err(StorageError::NotFound {
            key: keys::patient(patient_id),
        })
    }
}

impl PatientStore for MemoryStore {
    fn insert_patient(&self, patient: Patient) -> Result<(), StorageError> {
        self.write(|db| {
            if db.patients.contains_key(&patient.patient_id) {
                return Err(StorageError::AlreadyExists {
                    key: keys::patient(&patient.patient_id),
                });
            }
            db.patients.insert(patient.patient_id.clone(), patient);
            Ok(())
        })
    }

    fn patient(&self, patient_id: &str) -> Result<Patient, StorageError> {
        self.read()?
            .patients
            .get(patient_id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                key: keys::patient(patient_id),
            })
    }

    fn save_patient(&self, patient: &Patient) -> Result<(), StorageError> {
        self.write(|db| {
            require_patient(db, &patient.patient_id)?;
            db.patients
                .insert(patient.patient_id.clone(), patient.clone());
            Ok(())
        })
    }

    fn delete_patient(&self, patient_id: &str) -> Result<(), StorageError> {
        self.write(|db| {
            require_patient(db, patient_id)?;
            db.patients.remove(patient_id);
            db.diagnostics.remove(patient_id);
            db.monitoring.remove(patient_id);
            Ok(())
        })
    }

    fn record_diagnostic(
        &self,
        patient: &Patient,
        diagnostic: Diagnostic,
    ) -> Result<(), StorageError> {
        self.write(|db| {
            require_patient(db, &patient.patient_id)?;
            db.patients
                .insert(patient.patient_id.clone(), patient.clone());
            db.diagnostics
                .entry(patient.patient_id.clone())
                .or_default()
                .push(diagnostic);
            Ok(())
        })
    }

    fn diagnostics(&self, patient_id: &str) -> Result<Vec<Diagnostic>, StorageError> {
        let db = self.read()?;
        require_patient(&db, patient_id)?;
        Ok(db.diagnostics.get(patient_id).cloned().unwrap_or_default())
    }

    fn latest_diagnostic(&self, patient_id: &str) -> Result<Diagnostic, StorageError> {
        let db = self.read()?;
        require_patient(&db, patient_id)?;
        // `max_by_key` keeps the last of equal maxima.
        db.diagnostics
            .get(patient_id)
            .and_then(|records| records.iter().max_by_key(|d| d.submitted_at))
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                key: keys::latest_diagnostic(patient_id),
            })
    }

    fn append_monitoring(&self, monitoring: Monitoring) -> Result<(), StorageError> {
        self.write(|db| {
            require_patient(db, &monitoring.patient_id)?;
            db.monitoring
                .entry(monitoring.patient_id.clone())
                .or_default()
                .push(monitoring);
            Ok(())
        })
    }

    fn monitoring(&self, patient_id: &str) -> Result<Vec<Monitoring>, StorageError> {
        let db = self.read()?;
        require_patient(&db, patient_id)?;
        Ok(db.monitoring.get(patient_id).cloned().unwrap_or_default())
    }
}
