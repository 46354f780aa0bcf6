//! myeloma-rules
//!
//! Clinical rules for multiple myeloma. Pure functions over patient and
//! diagnostic snapshots with no storage dependency.
//!
//! * [`criteria`]: IMWG SLiM-CRAB disease-defining criteria.
//! * [`next_tests`]: follow-up diagnostics suggested by the latest workup.
//! * [`staging`]: ISS / R-ISS stage and prognosis.
//! * [`treatment`]: treatment recommendations under a guideline framework,
//!   with one rule table per framework in [`guidelines`].

pub mod criteria;
pub mod error;
pub mod guidelines;
pub mod next_tests;
pub mod staging;
pub mod treatment;

use myeloma_core::models::patient::Patient;
use treatment::{Entry, Framework, Rule, TreatmentPlan};

/// Recommendation appended when no rule produced one.
pub const BOARD_FALLBACK: &str = "Discuss at a multidisciplinary tumor board.";

/// Fixed next step returned with every treatment plan.
pub const NEXT_STEP: &str =
    "Reassess response after each treatment cycle with serum and urine protein electrophoresis.";

/// Trait implemented by each guideline framework.
pub trait Guideline: Send + Sync {
    /// The framework this rule table encodes.
    fn framework(&self) -> Framework;

    /// Human-readable name (e.g., "NICE NG35").
    fn name(&self) -> &str;

    /// Rules in evaluation order. Each contributes at most one entry.
    fn rules(&self) -> &[Rule];

    /// Evaluate every rule against `patient`, in order.
    fn recommend(&self, patient: &Patient) -> TreatmentPlan {
        let mut recommendations = Vec::new();
        let mut notes = Vec::new();

        for rule in self.rules() {
            match rule.apply(patient) {
                Some(Entry::Recommendation(text)) => recommendations.push(text),
                Some(Entry::Note(text)) => notes.push(text),
                None => {}
            }
        }

        if recommendations.is_empty() {
            recommendations.push(BOARD_FALLBACK.to_string());
        }

        TreatmentPlan {
            framework: self.framework(),
            recommendations,
            notes,
            next_step: NEXT_STEP.to_string(),
        }
    }
}

/// Return all registered guidelines.
pub fn all_guidelines() -> Vec<Box<dyn Guideline>> {
    vec![
        Box::new(guidelines::consensus::Consensus),
        Box::new(guidelines::nice::Nice),
        Box::new(guidelines::nccn::Nccn),
    ]
}

/// Look up the guideline for a framework.
pub fn get_guideline(framework: Framework) -> Box<dyn Guideline> {
    match framework {
        Framework::Consensus => Box::new(guidelines::consensus::Consensus),
        Framework::Nice => Box::new(guidelines::nice::Nice),
        Framework::Nccn => Box::new(guidelines::nccn::Nccn),
    }
}
