//! Regression tree grown by variance reduction (CART).
//!
//! Nodes keep the mean target and sample count of the training rows that
//! reached them: the cover-weighted average of a split's children equals the
//! parent value, which is what makes the path-additive attribution in
//! `attribution` exact.

use crate::features::{FeatureVector, N_FEATURES};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Node {
    Leaf {
        value: f64,
        n_samples: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        value: f64,
        n_samples: usize,
    },
}

impl Node {
    pub fn value(&self) -> f64 {
        match self {
            Node::Leaf { value, .. } | Node::Split { value, .. } => *value,
        }
    }
}

/// Stopping and subsampling parameters for one tree.
#[derive(Debug, Clone, Copy)]
pub struct GrowthParams {
    pub max_depth: usize,
    pub min_samples_leaf: usize,
    pub min_samples_split: usize,
    /// Candidate features drawn per split (log2 of the feature count).
    pub max_features: usize,
}

impl GrowthParams {
    pub fn log2_features(max_depth: usize, min_samples_leaf: usize, min_samples_split: usize) -> Self {
        let max_features = ((N_FEATURES as f64).log2().floor() as usize).max(1);
        Self {
            max_depth,
            min_samples_leaf,
            min_samples_split,
            max_features,
        }
    }
}

/// A fitted regression tree. Root is node 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<Node>,
}

impl DecisionTree {
    pub fn fit<R: Rng>(
        samples: &[FeatureVector],
        targets: &[f64],
        indices: &[usize],
        params: &GrowthParams,
        rng: &mut R,
    ) -> Self {
        let mut tree = DecisionTree { nodes: Vec::new() };
        tree.grow(samples, targets, indices.to_vec(), 0, params, rng);
        tree
    }

    pub fn predict(&self, sample: &FeatureVector) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value, .. } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    idx = if sample[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Grow the subtree for `indices`, returning its node index.
    fn grow<R: Rng>(
        &mut self,
        samples: &[FeatureVector],
        targets: &[f64],
        indices: Vec<usize>,
        depth: usize,
        params: &GrowthParams,
        rng: &mut R,
    ) -> usize {
        let n = indices.len();
        let value = indices.iter().map(|&i| targets[i]).sum::<f64>() / n.max(1) as f64;

        let can_split = depth < params.max_depth
            && n >= params.min_samples_split
            && n >= 2 * params.min_samples_leaf;
        let split = if can_split {
            best_split(samples, targets, &indices, params, rng)
        } else {
            None
        };

        let Some((feature, threshold)) = split else {
            self.nodes.push(Node::Leaf {
                value,
                n_samples: n,
            });
            return self.nodes.len() - 1;
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| samples[i][feature] <= threshold);

        // Reserve this node's slot before growing children.
        let node_idx = self.nodes.len();
        self.nodes.push(Node::Leaf {
            value,
            n_samples: n,
        });
        let left = self.grow(samples, targets, left_idx, depth + 1, params, rng);
        let right = self.grow(samples, targets, right_idx, depth + 1, params, rng);
        self.nodes[node_idx] = Node::Split {
            feature,
            threshold,
            left,
            right,
            value,
            n_samples: n,
        };
        node_idx
    }
}

/// Find the (feature, threshold) pair minimizing the weighted child SSE over
/// a random feature subset. Returns `None` when no split satisfies the leaf
/// minimum on both sides.
fn best_split<R: Rng>(
    samples: &[FeatureVector],
    targets: &[f64],
    indices: &[usize],
    params: &GrowthParams,
    rng: &mut R,
) -> Option<(usize, f64)> {
    let n = indices.len();
    let total_sum: f64 = indices.iter().map(|&i| targets[i]).sum();

    let mut candidates: Vec<usize> = (0..N_FEATURES).collect();
    candidates.shuffle(rng);
    candidates.truncate(params.max_features.min(N_FEATURES));
    // Deterministic evaluation order regardless of shuffle outcome.
    candidates.sort_unstable();

    let mut best: Option<(usize, f64, f64)> = None; // (feature, threshold, score)

    for &feature in &candidates {
        let mut order: Vec<usize> = indices.to_vec();
        order.sort_by(|&a, &b| {
            samples[a][feature]
                .partial_cmp(&samples[b][feature])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut left_sum = 0.0;
        for split_at in 1..n {
            left_sum += targets[order[split_at - 1]];

            let lo = samples[order[split_at - 1]][feature];
            let hi = samples[order[split_at]][feature];
            if hi <= lo {
                continue; // tied values cannot separate
            }
            if split_at < params.min_samples_leaf || n - split_at < params.min_samples_leaf {
                continue;
            }

            // Minimizing weighted child SSE is maximizing this quantity.
            let right_sum = total_sum - left_sum;
            let n_left = split_at as f64;
            let n_right = (n - split_at) as f64;
            let score = left_sum * left_sum / n_left + right_sum * right_sum / n_right;

            let threshold = (lo + hi) / 2.0;
            let better = match best {
                Some((_, _, best_score)) => score > best_score,
                None => true,
            };
            if better {
                best = Some((feature, threshold, score));
            }
        }
    }

    best.map(|(feature, threshold, _)| (feature, threshold))
}
