//! myeloma-storage
//!
//! The record store consumed by the engine: a synchronous [`PatientStore`]
//! trait and an in-process implementation with optional JSON snapshots on
//! local disk.

pub mod error;
pub mod memory;
pub mod state;
pub mod store;

pub use memory::MemoryStore;
pub use store::PatientStore;
