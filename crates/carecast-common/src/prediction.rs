//! The prediction-output record: the sole contract between the pipeline
//! and its persistence / presentation / notification collaborators.

use crate::label::RiskLabel;
use serde::{Deserialize, Serialize};

/// One scored patient. Created fresh on every inference call; a later run
/// for the same identifier simply produces a replacement record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPrediction {
    /// Identifier from the input record, unchanged.
    #[serde(rename = "DESYNPUF_ID")]
    pub id: String,

    /// Integer risk scores in [0, 100], one per horizon.
    #[serde(rename = "RISK_30D")]
    pub risk_30d: u8,
    #[serde(rename = "RISK_60D")]
    pub risk_60d: u8,
    #[serde(rename = "RISK_90D")]
    pub risk_90d: u8,

    /// Severity label derived from the 30-day score only.
    #[serde(rename = "RISK_LABEL")]
    pub label: RiskLabel,

    /// Up to three feature names, most influential first.
    #[serde(rename = "TOP_3_FEATURES")]
    pub top_features: Vec<String>,

    /// Numbered, pipe-delimited intervention list.
    #[serde(rename = "AI_RECOMMENDATIONS")]
    pub recommendation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_collaborator_column_names() {
        let pred = RiskPrediction {
            id: "A1".into(),
            risk_30d: 61,
            risk_60d: 55,
            risk_90d: 48,
            label: RiskLabel::HighRisk,
            top_features: vec!["AGE".into(), "COMOR_COUNT".into()],
            recommendation: "1. Enhanced care monitoring recommended".into(),
        };
        let json = serde_json::to_string(&pred).unwrap();
        assert!(json.contains("\"RISK_30D\":61"));
        assert!(json.contains("\"RISK_LABEL\":\"High Risk\""));
        assert!(json.contains("\"TOP_3_FEATURES\""));
    }
}
