//! Categorical severity labels derived from the 30-day risk score.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Five ordered severity levels. Derived solely from the 30-day score.
/// Serialized with the same display strings the CSV boundary writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    #[serde(rename = "Very Low Risk")]
    VeryLowRisk,
    #[serde(rename = "Low Risk")]
    LowRisk,
    #[serde(rename = "Moderate Risk")]
    ModerateRisk,
    #[serde(rename = "High Risk")]
    HighRisk,
    #[serde(rename = "Very High Risk")]
    VeryHighRisk,
}

impl RiskLabel {
    /// Threshold mapping for an integer score in [0, 100].
    pub fn from_score(score: u8) -> Self {
        if score >= 85 {
            RiskLabel::VeryHighRisk
        } else if score >= 60 {
            RiskLabel::HighRisk
        } else if score >= 40 {
            RiskLabel::ModerateRisk
        } else if score >= 20 {
            RiskLabel::LowRisk
        } else {
            RiskLabel::VeryLowRisk
        }
    }

    /// All labels in ascending severity order, for confusion matrices.
    pub const ALL: [RiskLabel; 5] = [
        RiskLabel::VeryLowRisk,
        RiskLabel::LowRisk,
        RiskLabel::ModerateRisk,
        RiskLabel::HighRisk,
        RiskLabel::VeryHighRisk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::VeryLowRisk => "Very Low Risk",
            RiskLabel::LowRisk => "Low Risk",
            RiskLabel::ModerateRisk => "Moderate Risk",
            RiskLabel::HighRisk => "High Risk",
            RiskLabel::VeryHighRisk => "Very High Risk",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_boundaries_exact() {
        assert_eq!(RiskLabel::from_score(85), RiskLabel::VeryHighRisk);
        assert_eq!(RiskLabel::from_score(84), RiskLabel::HighRisk);
        assert_eq!(RiskLabel::from_score(60), RiskLabel::HighRisk);
        assert_eq!(RiskLabel::from_score(59), RiskLabel::ModerateRisk);
        assert_eq!(RiskLabel::from_score(40), RiskLabel::ModerateRisk);
        assert_eq!(RiskLabel::from_score(39), RiskLabel::LowRisk);
        assert_eq!(RiskLabel::from_score(20), RiskLabel::LowRisk);
        assert_eq!(RiskLabel::from_score(19), RiskLabel::VeryLowRisk);
    }

    #[test]
    fn test_label_extremes() {
        assert_eq!(RiskLabel::from_score(0), RiskLabel::VeryLowRisk);
        assert_eq!(RiskLabel::from_score(100), RiskLabel::VeryHighRisk);
    }

    #[test]
    fn test_serde_matches_display_strings() {
        for label in RiskLabel::ALL {
            let json = serde_json::to_string(&label).unwrap();
            assert_eq!(json, format!("\"{}\"", label.as_str()));
            let back: RiskLabel = serde_json::from_str(&json).unwrap();
            assert_eq!(back, label);
        }
    }

    #[test]
    fn test_labels_are_ordered() {
        assert!(RiskLabel::VeryLowRisk < RiskLabel::VeryHighRisk);
        assert!(RiskLabel::LowRisk < RiskLabel::ModerateRisk);
    }
}
