use axum::Json;
use myeloma_rules::treatment::Framework;
use serde::Serialize;

#[derive(Serialize)]
pub struct GuidelineSummary {
    pub framework: Framework,
    pub name: String,
    pub rule_count: usize,
}

/// List every guideline framework the engine can evaluate.
pub async fn list_guidelines() -> Json<Vec<GuidelineSummary>> {
    let guidelines = myeloma_rules::all_guidelines()
        .iter()
        .map(|g| GuidelineSummary {
            framework: g.framework(),
            name: g.name().to_string(),
            rule_count: g.rules().len(),
        })
        .collect();
    Json(guidelines)
}
