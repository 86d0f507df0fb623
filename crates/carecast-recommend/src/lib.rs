//! carecast-recommend — Rule-based intervention synthesis.
//!
//! Maps a patient's top-contributing risk features (plus the 30-day score
//! band) to a short, deduplicated list of actionable care interventions.

pub mod engine;
pub mod rules;

pub use engine::{format_recommendations, recommend};
