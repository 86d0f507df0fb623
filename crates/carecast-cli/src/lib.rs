//! carecast-cli — train / predict / evaluate entry points and CSV I/O.

pub mod config;
pub mod dataset;
