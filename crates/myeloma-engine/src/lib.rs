//! myeloma-engine
//!
//! The operations callers invoke: load state from a [`PatientStore`], run the
//! rules, write derived state back, and emit audit events.
//!
//! [`PatientStore`]: myeloma_storage::PatientStore

pub mod audit;
pub mod engine;
pub mod error;
pub mod payload;

pub use engine::{Engine, MONITORING_DIRECTIVE, MonitoringDirective};
pub use error::EngineError;
