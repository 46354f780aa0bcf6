use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{field} = {value} is outside range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("missing required field: {0}")]
    MissingField(String),
}
