//! Per-sample feature attribution against the 30-day forest.
//!
//! Path-additive decomposition: walking a tree from root to leaf, each split
//! credits its feature with the change in node value along the branch taken.
//! Node values are training means, so children average back to their parent
//! under the training cover weights and the credits sum exactly:
//! baseline + Σ contributions = raw ensemble output for the sample.

use crate::bundle::ModelBundle;
use crate::features::{FeatureVector, FEATURE_COLUMNS, N_FEATURES};
use crate::tree::{DecisionTree, Node};
use carecast_common::{CarecastError, Result};

/// Signed per-feature contributions for one sample.
#[derive(Debug, Clone)]
pub struct AttributionResult {
    /// Indexed by the frozen feature column order.
    pub contributions: [f64; N_FEATURES],
    /// Mean root value across the ensemble.
    pub baseline: f64,
    /// Pre-clip ensemble output; equals baseline + Σ contributions.
    pub raw_output: f64,
}

impl AttributionResult {
    /// Feature names ranked by absolute contribution, largest first, ties
    /// resolved by the frozen declaration order. Exactly-zero contributions
    /// are dropped, so the list may hold fewer than `limit` names.
    pub fn top_features(&self, limit: usize) -> Vec<String> {
        let mut ranked: Vec<(usize, f64)> = self
            .contributions
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, c)| *c != 0.0)
            .collect();
        // Stable sort keeps declaration order for equal magnitudes.
        ranked.sort_by(|a, b| {
            b.1.abs()
                .partial_cmp(&a.1.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
            .into_iter()
            .take(limit)
            .map(|(i, _)| FEATURE_COLUMNS[i].to_string())
            .collect()
    }
}

/// Decompose the 30-day prediction for one normalized sample.
///
/// Fails (per record, non-fatally for the batch) when the feature vector is
/// malformed; the caller empties that record's top-feature list and falls
/// back to score-band recommendations.
pub fn attribute(bundle: &ModelBundle, features: &FeatureVector) -> Result<AttributionResult> {
    if let Some(position) = features.iter().position(|v| !v.is_finite()) {
        return Err(CarecastError::Attribution(format!(
            "non-finite value for feature {}",
            FEATURE_COLUMNS[position]
        )));
    }

    let model = &bundle.risk_30d;
    let scaled = model.scaler.transform(features);

    let n_trees = model.forest.trees.len().max(1) as f64;
    let mut contributions = [0.0f64; N_FEATURES];
    let mut baseline = 0.0;
    for tree in &model.forest.trees {
        baseline += tree.nodes[0].value();
        accumulate_path(tree, &scaled, &mut contributions);
    }
    baseline /= n_trees;
    for c in &mut contributions {
        *c /= n_trees;
    }

    let raw_output = baseline + contributions.iter().sum::<f64>();
    Ok(AttributionResult {
        contributions,
        baseline,
        raw_output,
    })
}

/// Walk one tree's decision path, crediting each split's feature with the
/// value change of the branch taken.
fn accumulate_path(tree: &DecisionTree, sample: &FeatureVector, contributions: &mut [f64]) {
    let mut idx = 0;
    loop {
        match &tree.nodes[idx] {
            Node::Leaf { .. } => return,
            Node::Split {
                feature,
                threshold,
                left,
                right,
                value,
                ..
            } => {
                let next = if sample[*feature] <= *threshold {
                    *left
                } else {
                    *right
                };
                contributions[*feature] += tree.nodes[next].value() - value;
                idx = next;
            }
        }
    }
}
