use myeloma_core::models::diagnostic::Diagnostic;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::staging::BETA2_MICROGLOBULIN_HIGH;

pub const FISH_PANEL: &str = "FISH for t(4;14) and t(14;16)";
pub const BONE_MARROW_BIOPSY: &str = "Bone Marrow Biopsy";

/// Recommended follow-up tests, index-aligned with their rationale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NextTests {
    pub recommended_tests: Vec<String>,
    pub rationale: Vec<String>,
}

impl NextTests {
    fn push(&mut self, test: &str, rationale: &str) {
        self.recommended_tests.push(test.to_string());
        self.rationale.push(rationale.to_string());
    }

    /// `(test, rationale)` pairs in recommendation order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.recommended_tests
            .iter()
            .map(String::as_str)
            .zip(self.rationale.iter().map(String::as_str))
    }
}

pub fn recommend(diagnostic: &Diagnostic) -> NextTests {
    let mut next = NextTests::default();

    if diagnostic.cytogenetics().is_empty() {
        next.push(FISH_PANEL, "High-risk cytogenetics not fully assessed.");
    }

    if diagnostic
        .beta2_microglobulin
        .is_some_and(|v| v > BETA2_MICROGLOBULIN_HIGH)
    {
        next.push(
            BONE_MARROW_BIOPSY,
            "Elevated beta-2 microglobulin requires marrow confirmation.",
        );
    }

    next
}
