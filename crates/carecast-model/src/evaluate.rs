//! Label-space evaluation of 30-day scores.
//!
//! Collapses true and predicted scores to the five severity labels and
//! reports a confusion matrix with per-label precision/recall/F1. Used by
//! the `evaluate` CLI subcommand; purely diagnostic.

use carecast_common::RiskLabel;
use std::fmt;

#[derive(Debug, Clone)]
pub struct ConfusionMatrix {
    /// counts[actual][predicted], indexed by `RiskLabel::ALL` order.
    pub counts: [[usize; 5]; 5],
}

#[derive(Debug, Clone, Copy)]
pub struct LabelMetrics {
    pub label: RiskLabel,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

impl ConfusionMatrix {
    pub fn from_scores(actual: &[u8], predicted: &[u8]) -> Self {
        let mut counts = [[0usize; 5]; 5];
        for (a, p) in actual.iter().zip(predicted) {
            let row = label_index(RiskLabel::from_score(*a));
            let col = label_index(RiskLabel::from_score(*p));
            counts[row][col] += 1;
        }
        Self { counts }
    }

    pub fn per_label(&self) -> Vec<LabelMetrics> {
        RiskLabel::ALL
            .iter()
            .enumerate()
            .map(|(i, &label)| {
                let tp = self.counts[i][i];
                let support: usize = self.counts[i].iter().sum();
                let predicted: usize = self.counts.iter().map(|row| row[i]).sum();
                let precision = ratio(tp, predicted);
                let recall = ratio(tp, support);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };
                LabelMetrics {
                    label,
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect()
    }

    pub fn accuracy(&self) -> f64 {
        let correct: usize = (0..5).map(|i| self.counts[i][i]).sum();
        let total: usize = self.counts.iter().flatten().sum();
        ratio(correct, total)
    }
}

fn label_index(label: RiskLabel) -> usize {
    RiskLabel::ALL
        .iter()
        .position(|l| *l == label)
        .expect("label present in ALL")
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<16} {}", "actual \\ pred", "VL     L      M      H      VH")?;
        for (i, label) in RiskLabel::ALL.iter().enumerate() {
            write!(f, "{:<16}", label.as_str())?;
            for j in 0..5 {
                write!(f, " {:<6}", self.counts[i][j])?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:<16} {:>9} {:>9} {:>9} {:>9}",
            "label", "precision", "recall", "f1", "support"
        )?;
        for m in self.per_label() {
            writeln!(
                f,
                "{:<16} {:>9.3} {:>9.3} {:>9.3} {:>9}",
                m.label.as_str(),
                m.precision,
                m.recall,
                m.f1,
                m.support
            )?;
        }
        write!(f, "accuracy: {:.3}", self.accuracy())
    }
}
