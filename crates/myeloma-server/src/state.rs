use std::sync::Arc;

use myeloma_engine::{Engine, EngineError};
use myeloma_storage::MemoryStore;

use crate::error::ApiError;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine<MemoryStore>>,
}

impl AppState {
    pub fn new(engine: Engine<MemoryStore>) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Run engine work on the blocking pool.
    ///
    /// Engine calls take the store lock and may flush the snapshot to disk,
    /// so they stay off the async workers.
    pub async fn run<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Engine<MemoryStore>) -> Result<T, EngineError> + Send + 'static,
        T: Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        tokio::task::spawn_blocking(move || work(&engine))
            .await
            .map_err(|e| ApiError::Internal(format!("engine task failed: {e}")))?
            .map_err(ApiError::from)
    }
}
