use crate::Guideline;
use crate::treatment::{Framework, Rule};

/// NCCN Multiple Myeloma guidelines, summary level. No renal, frailty or
/// cytogenetic rows.
pub struct Nccn;

static RULES: [Rule; 6] = [
    Rule::Induction {
        ecog: Some("ECOG 0-2: VRd (bortezomib, lenalidomide, dexamethasone) is a preferred primary regimen."),
        karnofsky: "Karnofsky >= 70: VRd (bortezomib, lenalidomide, dexamethasone) is a preferred primary regimen.",
        fallback: "Poor performance status: DRd (daratumumab, lenalidomide, dexamethasone) is preferred for non-transplant candidates.",
    },
    Rule::Transplant {
        eligible: "Transplant candidate: primary therapy followed by autologous HCT.",
        ineligible: "Non-transplant candidate: continue primary therapy followed by maintenance.",
    },
    Rule::DiseaseActivity {
        active: "Active myeloma: begin primary therapy.",
        inactive: "Smoldering myeloma: observe at 3-6 month intervals or enroll in a clinical trial.",
    },
    Rule::Refractory {
        note: "Refractory disease ({status}): select a regimen for previously treated myeloma (KPd, DPd or Isa-Kd).",
    },
    Rule::Progression {
        recommendation: "Disease progression: treat as relapsed/refractory myeloma.",
    },
    Rule::Neuropathy {
        recommendation: "Peripheral neuropathy grade >= 2: avoid bortezomib; prefer carfilzomib-based regimens.",
    },
];

impl Guideline for Nccn {
    fn framework(&self) -> Framework {
        Framework::Nccn
    }

    fn name(&self) -> &str {
        "NCCN Multiple Myeloma"
    }

    fn rules(&self) -> &[Rule] {
        &RULES
    }
}
