//! carecast-common — Shared types and errors used across all Carecast crates.

pub mod error;
pub mod label;
pub mod prediction;
pub mod record;

// Re-export commonly used types
pub use error::{CarecastError, Result};
pub use label::RiskLabel;
pub use prediction::RiskPrediction;
pub use record::RawPatientRecord;
