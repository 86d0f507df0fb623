//! Per-column standardization (zero mean, unit variance).
//!
//! Fit on the training partition only; the fitted moments travel inside the
//! model artifact so inference applies the exact training-time transform.

use crate::features::{FeatureVector, N_FEATURES};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl StandardScaler {
    /// Fit column means and standard deviations. Constant columns keep a
    /// unit divisor so transform stays finite.
    pub fn fit(samples: &[FeatureVector]) -> Self {
        let n = samples.len().max(1) as f64;
        let mut mean = vec![0.0f64; N_FEATURES];
        for sample in samples {
            for (m, v) in mean.iter_mut().zip(sample.iter()) {
                *m += v;
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        let mut variance = vec![0.0f64; N_FEATURES];
        for sample in samples {
            for ((var, v), m) in variance.iter_mut().zip(sample.iter()).zip(mean.iter()) {
                let d = v - m;
                *var += d * d;
            }
        }
        let std = variance
            .into_iter()
            .map(|var| {
                let s = (var / n).sqrt();
                if s > 0.0 { s } else { 1.0 }
            })
            .collect();

        Self { mean, std }
    }

    pub fn transform(&self, sample: &FeatureVector) -> FeatureVector {
        let mut scaled = [0.0f64; N_FEATURES];
        for i in 0..N_FEATURES {
            scaled[i] = (sample[i] - self.mean[i]) / self.std[i];
        }
        scaled
    }

    pub fn transform_batch(&self, samples: &[FeatureVector]) -> Vec<FeatureVector> {
        samples.iter().map(|s| self.transform(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(v: f64) -> FeatureVector {
        let mut s = [0.0; N_FEATURES];
        s[0] = v;
        s
    }

    #[test]
    fn test_fit_centers_and_scales() {
        let data = vec![sample(1.0), sample(3.0)];
        let scaler = StandardScaler::fit(&data);
        assert!((scaler.mean[0] - 2.0).abs() < 1e-12);
        assert!((scaler.std[0] - 1.0).abs() < 1e-12);
        let t = scaler.transform(&sample(3.0));
        assert!((t[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_column_stays_finite() {
        let data = vec![sample(5.0), sample(5.0), sample(5.0)];
        let scaler = StandardScaler::fit(&data);
        let t = scaler.transform(&sample(5.0));
        assert!(t.iter().all(|v| v.is_finite()));
        assert_eq!(t[0], 0.0);
    }
}
