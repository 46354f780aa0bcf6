use myeloma_core::models::diagnostic::Diagnostic;
use myeloma_core::models::monitoring::Monitoring;
use myeloma_core::models::patient::Patient;

use crate::error::StorageError;

/// CRUD access to patients and the records they own.
///
/// Every call is synchronous and self-contained. Calls that touch more than
/// one record (`record_diagnostic`, `delete_patient`) apply all-or-nothing.
pub trait PatientStore: Send + Sync {
    /// Create a patient. Fails with `AlreadyExists` on a duplicate id.
    fn insert_patient(&self, patient: Patient) -> Result<(), StorageError>;

    fn patient(&self, patient_id: &str) -> Result<Patient, StorageError>;

    /// Overwrite an existing patient.
    fn save_patient(&self, patient: &Patient) -> Result<(), StorageError>;

    /// Delete a patient together with its diagnostics and monitoring records.
    fn delete_patient(&self, patient_id: &str) -> Result<(), StorageError>;

    /// Save `patient` and append `diagnostic` in one write.
    fn record_diagnostic(
        &self,
        patient: &Patient,
        diagnostic: Diagnostic,
    ) -> Result<(), StorageError>;

    /// All diagnostics for a patient, in submission order.
    fn diagnostics(&self, patient_id: &str) -> Result<Vec<Diagnostic>, StorageError>;

    /// The diagnostic with the latest `submitted_at`. On a tie the one
    /// appended last wins.
    fn latest_diagnostic(&self, patient_id: &str) -> Result<Diagnostic, StorageError>;

    fn append_monitoring(&self, monitoring: Monitoring) -> Result<(), StorageError>;

    fn monitoring(&self, patient_id: &str) -> Result<Vec<Monitoring>, StorageError>;
}
