//! Top-level command orchestration.
pub mod backup;
pub mod version;
