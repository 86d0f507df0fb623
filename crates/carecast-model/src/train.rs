//! Offline training: split, standardize, fit one forest per horizon,
//! report held-out error.

use crate::bundle::{HorizonModel, ModelBundle};
use crate::config::TrainingConfig;
use crate::features::{normalize, FeatureVector, Horizon};
use crate::forest::RandomForest;
use crate::scaler::StandardScaler;
use crate::tree::GrowthParams;
use carecast_common::{CarecastError, RawPatientRecord, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

/// One historical patient: raw fields plus realized risk per horizon.
#[derive(Debug, Clone)]
pub struct TrainingRow {
    pub record: RawPatientRecord,
    pub risk_30d: f64,
    pub risk_60d: f64,
    pub risk_90d: f64,
}

impl TrainingRow {
    fn target(&self, horizon: Horizon) -> f64 {
        match horizon {
            Horizon::Days30 => self.risk_30d,
            Horizon::Days60 => self.risk_60d,
            Horizon::Days90 => self.risk_90d,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrainingDataset {
    pub rows: Vec<TrainingRow>,
}

/// Held-out metrics for one horizon. Reporting only, never gating.
#[derive(Debug, Clone, Copy)]
pub struct HorizonReport {
    pub horizon: Horizon,
    pub mae: f64,
    pub r2: f64,
}

/// Train the three-horizon bundle.
///
/// The dataset is shuffled once with the configured seed and split into
/// train/eval partitions; each horizon standardizes on the train partition
/// and fits its own forest. Fails with `InsufficientData` when the split
/// cannot produce a non-empty eval partition and a train partition of at
/// least `min_samples_leaf` rows.
pub fn train(
    dataset: &TrainingDataset,
    config: &TrainingConfig,
) -> Result<(ModelBundle, Vec<HorizonReport>)> {
    let n = dataset.rows.len();
    let n_eval = (n as f64 * config.eval_fraction).floor() as usize;
    let n_train = n - n_eval;
    if n_eval == 0 || n_train < config.min_samples_leaf {
        let required = ((config.min_samples_leaf as f64 / (1.0 - config.eval_fraction)).ceil()
            as usize)
            .max(2);
        return Err(CarecastError::InsufficientData { rows: n, required });
    }

    let features: Vec<FeatureVector> = dataset.rows.iter().map(|r| normalize(&r.record)).collect();

    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(config.seed);
    order.shuffle(&mut rng);
    let (train_idx, eval_idx) = order.split_at(n_train);

    info!(
        rows = n,
        train = n_train,
        eval = n_eval,
        seed = config.seed,
        "training risk ensemble"
    );

    let params = GrowthParams::log2_features(
        config.max_depth,
        config.min_samples_leaf,
        config.min_samples_split,
    );

    let train_features: Vec<FeatureVector> = train_idx.iter().map(|&i| features[i]).collect();

    let mut models = Vec::with_capacity(3);
    let mut reports = Vec::with_capacity(3);
    for horizon in Horizon::ALL {
        let train_targets: Vec<f64> = train_idx
            .iter()
            .map(|&i| dataset.rows[i].target(horizon))
            .collect();

        let scaler = StandardScaler::fit(&train_features);
        let scaled = scaler.transform_batch(&train_features);
        let forest = RandomForest::fit(&scaled, &train_targets, config.n_trees, &params, config.seed);

        let predictions: Vec<f64> = eval_idx
            .iter()
            .map(|&i| forest.predict(&scaler.transform(&features[i])))
            .collect();
        let actuals: Vec<f64> = eval_idx
            .iter()
            .map(|&i| dataset.rows[i].target(horizon))
            .collect();
        let report = HorizonReport {
            horizon,
            mae: mean_absolute_error(&actuals, &predictions),
            r2: r_squared(&actuals, &predictions),
        };
        info!(
            target = horizon.target_column(),
            mae = report.mae,
            r2 = report.r2,
            "held-out evaluation"
        );

        models.push(HorizonModel { scaler, forest });
        reports.push(report);
    }

    let risk_90d = models.pop().expect("three horizons fitted");
    let risk_60d = models.pop().expect("three horizons fitted");
    let risk_30d = models.pop().expect("three horizons fitted");
    Ok((ModelBundle::new(risk_30d, risk_60d, risk_90d), reports))
}

pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / actual.len() as f64
}

/// Coefficient of determination; a constant actual vector yields 0.0.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return 0.0;
    }
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    1.0 - ss_res / ss_tot
}
