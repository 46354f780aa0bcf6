use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("unknown guideline framework: {0}")]
    UnknownFramework(String),
}
