//! myeloma-core
//!
//! Pure domain types and storage key conventions.
//! No storage or transport dependency. This is the shared vocabulary of the
//! myeloma decision-support system.

pub mod error;
pub mod keys;
pub mod models;
