//! Feature normalization: raw record → fixed-order numeric vector.
//!
//! The column order here is frozen; the same order is recorded inside every
//! trained artifact and verified again at load time. Any record missing a
//! field contributes 0 for that feature.

use carecast_common::record::CHRONIC_CONDITIONS;
use carecast_common::RawPatientRecord;
use serde::{Deserialize, Serialize};

/// Number of model features.
pub const N_FEATURES: usize = 19;

/// Frozen feature column order, identical between training and inference.
/// CLAIMS_FLAG and COMOR_COUNT are derived during normalization.
pub const FEATURE_COLUMNS: [&str; N_FEATURES] = [
    "AGE",
    "TOTAL_CLAIMS_COST",
    "IN_ADM",
    "OUT_VISITS",
    "RX_ADH",
    "CLAIMS_FLAG",
    "COMOR_COUNT",
    "ALZHEIMER",
    "HEARTFAILURE",
    "CANCER",
    "PULMONARY",
    "OSTEOPOROSIS",
    "RHEUMATOID",
    "STROKE",
    "RENAL_DISEASE",
    "BP_S",
    "GLUCOSE",
    "HbA1c",
    "CHOLESTEROL",
];

/// A normalized sample in FEATURE_COLUMNS order.
pub type FeatureVector = [f64; N_FEATURES];

/// One of the three fixed scoring windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizon {
    Days30,
    Days60,
    Days90,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::Days30, Horizon::Days60, Horizon::Days90];

    /// Target column name in training datasets and output records.
    pub fn target_column(&self) -> &'static str {
        match self {
            Horizon::Days30 => "RISK_30D",
            Horizon::Days60 => "RISK_60D",
            Horizon::Days90 => "RISK_90D",
        }
    }
}

/// Build the fixed-order feature vector; absent fields default to 0.
pub fn normalize(record: &RawPatientRecord) -> FeatureVector {
    let cost = record.total_claims_cost.unwrap_or(0.0);
    let claims_flag = if cost > 0.0 { 1.0 } else { 0.0 };
    let comorbidity = record.comorbidity_count() as f64;

    let mut features = [0.0f64; N_FEATURES];
    features[0] = record.age.unwrap_or(0.0);
    features[1] = cost;
    features[2] = record.inpatient_admissions.unwrap_or(0.0);
    features[3] = record.outpatient_visits.unwrap_or(0.0);
    features[4] = record.rx_adherence.unwrap_or(0.0);
    features[5] = claims_flag;
    features[6] = comorbidity;
    for (i, condition) in CHRONIC_CONDITIONS.iter().enumerate() {
        features[7 + i] = record.chronic_flag(condition) as f64;
    }
    features[15] = record.systolic_bp.unwrap_or(0.0);
    features[16] = record.glucose.unwrap_or(0.0);
    features[17] = record.hba1c.unwrap_or(0.0);
    features[18] = record.cholesterol.unwrap_or(0.0);
    features
}
