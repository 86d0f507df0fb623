//! Recommendation synthesis: top features + score band → intervention text.

use crate::rules::{general_recommendations, rule_for};
use carecast_common::RawPatientRecord;
use std::collections::HashSet;

/// Maximum interventions carried into the output record.
const MAX_RECOMMENDATIONS: usize = 3;

/// Fallback when no rule and no score band yields anything.
const FALLBACK: &str = "Continue current care plan";

/// Collect up to three interventions for one patient.
///
/// Ranked top features are consulted in order; each feature's rule resolves
/// its list against the raw record value, new entries are appended in
/// first-seen order with exact-string dedup. Remaining slots are backfilled
/// from the 30-day score band's general list.
pub fn recommend(
    record: &RawPatientRecord,
    top_features: &[String],
    score_30d: u8,
) -> Vec<&'static str> {
    let mut selected: Vec<&'static str> = Vec::with_capacity(MAX_RECOMMENDATIONS);
    let mut seen: HashSet<&'static str> = HashSet::new();

    for feature in top_features {
        let Some(rule) = rule_for(feature) else {
            continue;
        };
        let raw_value = record.numeric_field(feature);
        for intervention in rule.interventions(raw_value) {
            if seen.insert(intervention) {
                selected.push(intervention);
            }
        }
    }

    for intervention in general_recommendations(score_30d) {
        if selected.len() >= MAX_RECOMMENDATIONS {
            break;
        }
        if seen.insert(intervention) {
            selected.push(intervention);
        }
    }

    selected.truncate(MAX_RECOMMENDATIONS);
    selected
}

/// Render the numbered, pipe-delimited recommendation string.
pub fn format_recommendations(interventions: &[&str]) -> String {
    if interventions.is_empty() {
        return FALLBACK.to_string();
    }
    interventions
        .iter()
        .enumerate()
        .map(|(i, text)| format!("{}. {}", i + 1, text))
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_feature_rules_take_priority_over_general() {
        let record = RawPatientRecord {
            id: "P1".into(),
            heartfailure: Some(1),
            ..Default::default()
        };
        let recs = recommend(&record, &features(&["HEARTFAILURE"]), 90);
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0], "Cardiology consultation for heart failure management");
    }

    #[test]
    fn test_backfills_from_score_band() {
        // GLUCOSE below threshold resolves to nothing; general high band fills in.
        let record = RawPatientRecord {
            id: "P2".into(),
            glucose: Some(90.0),
            ..Default::default()
        };
        let recs = recommend(&record, &features(&["GLUCOSE"]), 82);
        assert_eq!(
            recs,
            vec![
                "Immediate care coordination recommended",
                "Consider intensive case management",
                "Schedule urgent follow-up appointment",
            ]
        );
    }

    #[test]
    fn test_empty_top_features_low_score_uses_default_band() {
        let record = RawPatientRecord::default();
        let recs = recommend(&record, &[], 10);
        assert_eq!(
            recs,
            vec![
                "Continue preventive care routine",
                "Annual wellness visit recommended",
                "Maintain healthy lifestyle practices",
            ]
        );
    }

    #[test]
    fn test_deduplicates_across_features() {
        // Two features can never emit the same string today, but the engine
        // must still dedup exactly when the ranked list repeats a feature.
        let record = RawPatientRecord {
            id: "P3".into(),
            stroke: Some(1),
            ..Default::default()
        };
        let recs = recommend(&record, &features(&["STROKE", "STROKE"]), 10);
        assert_eq!(recs.len(), 3);
        let unique: HashSet<_> = recs.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_truncates_to_three() {
        let record = RawPatientRecord {
            id: "P4".into(),
            cancer: Some(1),
            pulmonary: Some(1),
            ..Default::default()
        };
        let recs = recommend(&record, &features(&["CANCER", "PULMONARY"]), 90);
        assert_eq!(recs.len(), 3);
        // Second feature's list never gets a slot.
        assert_eq!(recs[0], "Oncology consultation for treatment optimization");
    }

    #[test]
    fn test_format_numbers_and_joins() {
        let text = format_recommendations(&["a", "b"]);
        assert_eq!(text, "1. a | 2. b");
    }

    #[test]
    fn test_format_empty_falls_back() {
        assert_eq!(format_recommendations(&[]), "Continue current care plan");
    }

    #[test]
    fn test_unmapped_features_are_skipped() {
        let record = RawPatientRecord::default();
        let recs = recommend(&record, &features(&["CLAIMS_FLAG", "COMOR_COUNT"]), 50);
        assert_eq!(
            recs,
            vec![
                "Regular monitoring recommended",
                "Annual wellness visit scheduling",
                "Preventive care optimization",
            ]
        );
    }
}
