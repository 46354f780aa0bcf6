use myeloma_core::error::CoreError;
use myeloma_storage::error::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(StorageError),
}

impl EngineError {
    /// Stable tag for the error kind, reported alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::NotFound(_) => "not_found",
            EngineError::InvalidPayload(_) => "invalid_payload",
            EngineError::Conflict(_) => "conflict",
            EngineError::Storage(_) => "storage",
        }
    }
}

impl From<StorageError> for EngineError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => EngineError::NotFound(key),
            StorageError::AlreadyExists { key } => EngineError::Conflict(key),
            other => EngineError::Storage(other),
        }
    }
}

impl From<CoreError> for EngineError {
    fn from(e: CoreError) -> Self {
        EngineError::InvalidPayload(e.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::InvalidPayload(e.to_string())
    }
}
