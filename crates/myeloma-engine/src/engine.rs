use myeloma_core::models::diagnostic::Diagnostic;
use myeloma_core::models::monitoring::Monitoring;
use myeloma_core::models::patient::Patient;
use myeloma_rules::criteria::{self, CriteriaOutcome};
use myeloma_rules::next_tests::{self, NextTests};
use myeloma_rules::staging::{self, Staging};
use myeloma_rules::treatment::{Framework, TreatmentPlan};
use myeloma_storage::PatientStore;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::audit::AuditEvent;
use crate::error::EngineError;
use crate::payload::{DiagnosticsPayload, MonitoringPayload, NewPatient, ProfileUpdate};

pub const MONITORING_DIRECTIVE: &str = "Continue maintenance therapy and reassess in 3 months.";

/// Returned for every monitoring submission, whatever was observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoringDirective {
    pub recommendation: String,
}

/// Decision-support operations over a [`PatientStore`].
///
/// Each call is one read-modify-write against the store. Derived flags are
/// only ever written together with the change that produced them.
pub struct Engine<S> {
    store: S,
}

impl<S: PatientStore> Engine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a patient, evaluating BMI and SLiM-CRAB on the initial profile.
    pub fn register_patient(&self, new: NewPatient) -> Result<Patient, EngineError> {
        let mut patient = Patient::new(new.patient_id.trim(), new.name.trim(), new.date_of_birth);
        if let Some(clinical) = new.clinical {
            clinical.apply_to(&mut patient);
        }
        patient.validate()?;
        patient.refresh_bmi();
        criteria::evaluate(&patient).apply_to(&mut patient);

        self.store.insert_patient(patient.clone())?;

        AuditEvent::new("register", "patient", &patient.patient_id).emit();
        Ok(patient)
    }

    pub fn patient(&self, patient_id: &str) -> Result<Patient, EngineError> {
        Ok(self.store.patient(patient_id)?)
    }

    /// Overwrite clinical fields in place and recompute the derived state.
    pub fn update_patient_profile(
        &self,
        patient_id: &str,
        update: ProfileUpdate,
    ) -> Result<CriteriaOutcome, EngineError> {
        let mut patient = self.store.patient(patient_id)?;
        update.apply_to(&mut patient);
        patient.validate()?;
        patient.refresh_bmi();

        let outcome = criteria::evaluate(&patient);
        outcome.apply_to(&mut patient);
        patient.updated_at = jiff::Timestamp::now();
        self.store.save_patient(&patient)?;

        log_outcome(patient_id, &outcome);
        AuditEvent::new("update_profile", "patient", patient_id)
            .with_details(json!({
                "meets_crab": outcome.meets_crab,
                "meets_slim": outcome.meets_slim,
            }))
            .emit();
        Ok(outcome)
    }

    pub fn delete_patient(&self, patient_id: &str) -> Result<(), EngineError> {
        self.store.delete_patient(patient_id)?;
        AuditEvent::new("delete", "patient", patient_id).emit();
        Ok(())
    }

    /// Append a diagnostic record and re-evaluate SLiM-CRAB on the patient.
    ///
    /// Submitted calcium, creatinine, CBC hemoglobin, beta-2 microglobulin
    /// and LDH replace the patient's current values before evaluation. The
    /// updated patient and the record are written in one store call.
    pub fn submit_diagnostics(
        &self,
        patient_id: &str,
        payload: DiagnosticsPayload,
    ) -> Result<CriteriaOutcome, EngineError> {
        let mut patient = self.store.patient(patient_id)?;

        let diagnostic = Diagnostic {
            id: Uuid::new_v4(),
            patient_id: patient.patient_id.clone(),
            cbc: payload.lab_results.cbc,
            calcium: payload.lab_results.calcium,
            creatinine: payload.lab_results.creatinine,
            beta2_microglobulin: payload.lab_results.beta2_microglobulin,
            ldh: payload.lab_results.ldh,
            imaging_results: payload.imaging_results,
            biomarkers: payload.biomarkers,
            submitted_at: jiff::Timestamp::now(),
        };
        diagnostic.validate()?;
        diagnostic.overlay_labs(&mut patient);

        let outcome = criteria::evaluate(&patient);
        outcome.apply_to(&mut patient);
        patient.updated_at = diagnostic.submitted_at;

        let diagnostic_id = diagnostic.id;
        self.store.record_diagnostic(&patient, diagnostic)?;

        log_outcome(patient_id, &outcome);
        AuditEvent::new("submit", "diagnostic", diagnostic_id.to_string())
            .with_details(json!({ "patient_id": patient_id }))
            .emit();
        Ok(outcome)
    }

    pub fn diagnostics(&self, patient_id: &str) -> Result<Vec<Diagnostic>, EngineError> {
        Ok(self.store.diagnostics(patient_id)?)
    }

    pub fn next_tests(&self, patient_id: &str) -> Result<NextTests, EngineError> {
        let diagnostic = self.store.latest_diagnostic(patient_id)?;
        Ok(next_tests::recommend(&diagnostic))
    }

    pub fn staging(&self, patient_id: &str) -> Result<Staging, EngineError> {
        let diagnostic = self.store.latest_diagnostic(patient_id)?;
        Ok(staging::stage(&diagnostic))
    }

    /// Recommendations under the selected framework.
    ///
    /// A patient without any diagnostic is not recommendable and yields
    /// `NotFound`, even though the rules only read patient fields.
    pub fn treatment_recommendations(
        &self,
        patient_id: &str,
        framework: Option<&str>,
    ) -> Result<TreatmentPlan, EngineError> {
        let patient = self.store.patient(patient_id)?;
        self.store.latest_diagnostic(patient_id)?;

        let framework = Framework::from_selector(framework);
        let plan = myeloma_rules::get_guideline(framework).recommend(&patient);
        tracing::debug!(
            patient_id,
            framework = %framework,
            recommendations = plan.recommendations.len(),
            notes = plan.notes.len(),
            "treatment plan evaluated"
        );
        Ok(plan)
    }

    pub fn submit_monitoring(
        &self,
        patient_id: &str,
        payload: MonitoringPayload,
    ) -> Result<MonitoringDirective, EngineError> {
        let patient = self.store.patient(patient_id)?;
        payload.validate()?;

        let monitoring = Monitoring {
            id: Uuid::new_v4(),
            patient_id: patient.patient_id,
            date: payload
                .date
                .unwrap_or_else(|| jiff::Zoned::now().date()),
            m_protein: payload.m_protein,
            mrd_status: payload.mrd_status.trim().to_string(),
            symptoms: payload.symptoms,
        };
        let monitoring_id = monitoring.id;
        self.store.append_monitoring(monitoring)?;

        AuditEvent::new("submit", "monitoring", monitoring_id.to_string())
            .with_details(json!({ "patient_id": patient_id }))
            .emit();
        Ok(MonitoringDirective {
            recommendation: MONITORING_DIRECTIVE.to_string(),
        })
    }

    pub fn monitoring(&self, patient_id: &str) -> Result<Vec<Monitoring>, EngineError> {
        Ok(self.store.monitoring(patient_id)?)
    }
}

fn log_outcome(patient_id: &str, outcome: &CriteriaOutcome) {
    tracing::debug!(
        patient_id,
        meets_crab = outcome.meets_crab,
        meets_slim = outcome.meets_slim,
        crab = ?outcome.crab_criteria,
        slim = ?outcome.slim_criteria,
        "SLiM-CRAB evaluated"
    );
}
