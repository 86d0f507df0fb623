//! Bootstrap-aggregated regression forest for one horizon.

use crate::features::FeatureVector;
use crate::tree::{DecisionTree, GrowthParams};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit `n_trees` trees, each on a bootstrap resample of the training
    /// rows. A single seeded RNG drives resampling and per-split feature
    /// subsampling, so an identical (data, config) pair refits an identical
    /// forest.
    pub fn fit(
        samples: &[FeatureVector],
        targets: &[f64],
        n_trees: usize,
        params: &GrowthParams,
        seed: u64,
    ) -> Self {
        let n = samples.len();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut trees = Vec::with_capacity(n_trees);
        for _ in 0..n_trees {
            let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            trees.push(DecisionTree::fit(
                samples, targets, &bootstrap, params, &mut rng,
            ));
        }
        Self { trees }
    }

    /// Ensemble mean over all trees. Raw (pre-clip) output.
    pub fn predict(&self, sample: &FeatureVector) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict(sample)).sum();
        sum / self.trees.len().max(1) as f64
    }
}
