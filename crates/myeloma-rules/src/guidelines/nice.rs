use crate::Guideline;
use crate::treatment::{Framework, Rule};

/// NICE NG35 and its technology appraisals.
///
/// Leads with fit-vs-frail on Karnofsky alone (no ECOG branch) and uses the
/// regimens NICE has appraised.
pub struct Nice;

static RULES: [Rule; 9] = [
    Rule::Induction {
        ecog: None,
        karnofsky: "Fit (Karnofsky >= 70): bortezomib, thalidomide and dexamethasone (VTD) induction.",
        fallback: "Less fit (Karnofsky < 70): bortezomib, melphalan and prednisone (VMP), or lenalidomide and dexamethasone.",
    },
    Rule::Frailty {
        recommendation: "Frail (Karnofsky < 60): reduced-dose lenalidomide and dexamethasone with supportive care.",
    },
    Rule::Transplant {
        eligible: "Transplant-eligible: daratumumab with VTD induction, then autologous stem cell transplant.",
        ineligible: "Transplant-ineligible: daratumumab with lenalidomide and dexamethasone.",
    },
    Rule::DiseaseActivity {
        active: "Meets SLiM-CRAB criteria: start first-line treatment.",
        inactive: "Does not meet SLiM-CRAB criteria: monitor, or offer a clinical trial.",
    },
    Rule::CytogeneticRisk {
        high_risk: "High-risk cytogenetics: discuss at the haematology MDT and consider a clinical trial.",
        standard_risk: "Standard-risk cytogenetics.",
    },
    Rule::RenalImpairment {
        recommendation: "Renal impairment: prefer bortezomib-based treatment and reduce the lenalidomide dose.",
    },
    Rule::Refractory {
        note: "Refractory disease ({status}): consider carfilzomib with dexamethasone, or pomalidomide with dexamethasone.",
    },
    Rule::Progression {
        recommendation: "Disease progression: daratumumab, bortezomib and dexamethasone, or carfilzomib with dexamethasone.",
    },
    Rule::Neuropathy {
        recommendation: "Peripheral neuropathy grade >= 2: avoid thalidomide; give bortezomib subcutaneously and with caution.",
    },
];

impl Guideline for Nice {
    fn framework(&self) -> Framework {
        Framework::Nice
    }

    fn name(&self) -> &str {
        "NICE NG35"
    }

    fn rules(&self) -> &[Rule] {
        &RULES
    }
}
