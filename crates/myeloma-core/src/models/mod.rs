pub mod diagnostic;
pub mod monitoring;
pub mod patient;
pub mod units;
