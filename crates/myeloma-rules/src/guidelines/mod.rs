pub mod consensus;
pub mod nccn;
pub mod nice;
