use crate::Guideline;
use crate::treatment::{Framework, Rule};

/// Default framework: IMWG-aligned consensus practice. Lists every category.
pub struct Consensus;

static RULES: [Rule; 9] = [
    Rule::Induction {
        ecog: Some(
            "ECOG 0-2: eligible for triplet induction with bortezomib, lenalidomide and dexamethasone (VRd).",
        ),
        karnofsky: "Karnofsky >= 70: eligible for triplet induction with bortezomib, lenalidomide and dexamethasone (VRd).",
        fallback: "Limited performance status: start doublet induction with lenalidomide and dexamethasone (Rd).",
    },
    Rule::Transplant {
        eligible: "Transplant-eligible: induction, stem cell collection, then high-dose melphalan with autologous stem cell transplant.",
        ineligible: "Transplant-ineligible: daratumumab, lenalidomide and dexamethasone (DRd) until progression.",
    },
    Rule::CytogeneticRisk {
        high_risk: "High-risk cytogenetics: consider quadruplet induction (daratumumab-VRd) and tandem transplant.",
        standard_risk: "Standard-risk cytogenetics.",
    },
    Rule::DiseaseActivity {
        active: "SLiM-CRAB criteria met: initiate systemic therapy.",
        inactive: "SLiM-CRAB criteria not met: active monitoring or clinical trial enrollment.",
    },
    Rule::RenalImpairment {
        recommendation: "Renal impairment: adjust lenalidomide dose to creatinine clearance; bortezomib needs no adjustment.",
    },
    Rule::Refractory {
        note: "Refractory disease ({status}): consider salvage with carfilzomib, pomalidomide or anti-CD38 therapy.",
    },
    Rule::Progression {
        recommendation: "Disease progression: start a relapse regimen such as carfilzomib or daratumumab with pomalidomide and dexamethasone.",
    },
    Rule::Neuropathy {
        recommendation: "Peripheral neuropathy grade >= 2: avoid bortezomib and thalidomide.",
    },
    Rule::Frailty {
        recommendation: "Frail (Karnofsky < 60): use a frailty-adapted reduced-intensity regimen.",
    },
];

impl Guideline for Consensus {
    fn framework(&self) -> Framework {
        Framework::Consensus
    }

    fn name(&self) -> &str {
        "IMWG consensus"
    }

    fn rules(&self) -> &[Rule] {
        &RULES
    }
}
