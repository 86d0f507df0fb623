//! Training hyperparameters.
//!
//! Loaded from `carecast.toml` by the CLI; every field has the deployed
//! default so a missing file or section trains the reference configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Trees per horizon ensemble.
    #[serde(default = "default_n_trees")]
    pub n_trees: usize,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_min_samples_leaf")]
    pub min_samples_leaf: usize,
    #[serde(default = "default_min_samples_split")]
    pub min_samples_split: usize,
    /// Held-out fraction of the dataset used for the metric report.
    #[serde(default = "default_eval_fraction")]
    pub eval_fraction: f64,
    /// Seed for the split, bootstrap resampling, and feature subsampling.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_n_trees() -> usize { 50 }
fn default_max_depth() -> usize { 4 }
fn default_min_samples_leaf() -> usize { 50 }
fn default_min_samples_split() -> usize { 20 }
fn default_eval_fraction() -> f64 { 0.3 }
fn default_seed() -> u64 { 42 }

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_trees: default_n_trees(),
            max_depth: default_max_depth(),
            min_samples_leaf: default_min_samples_leaf(),
            min_samples_split: default_min_samples_split(),
            eval_fraction: default_eval_fraction(),
            seed: default_seed(),
        }
    }
}
