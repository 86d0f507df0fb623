//! Raw patient record as it arrives from claims extracts or the intake API.
//!
//! Every clinical field is optional; upstream extracts routinely omit
//! columns, and the single defaulting rule (absent → 0) lives in
//! `carecast-model`'s feature normalization, not in per-call coercion.

use serde::{Deserialize, Serialize};

/// The eight chronic-condition flag names, in their frozen order.
pub const CHRONIC_CONDITIONS: [&str; 8] = [
    "ALZHEIMER",
    "HEARTFAILURE",
    "CANCER",
    "PULMONARY",
    "OSTEOPOROSIS",
    "RHEUMATOID",
    "STROKE",
    "RENAL_DISEASE",
];

/// One patient as received, with an identifier and any subset of the
/// named clinical fields present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPatientRecord {
    /// Beneficiary identifier, carried through to the output verbatim.
    #[serde(rename = "DESYNPUF_ID")]
    pub id: String,

    #[serde(rename = "AGE", default)]
    pub age: Option<f64>,
    #[serde(rename = "GENDER", default)]
    pub gender: Option<u8>,
    #[serde(rename = "BMI", default)]
    pub bmi: Option<f64>,

    // Chronic-condition flags (0/1)
    #[serde(rename = "ALZHEIMER", default)]
    pub alzheimer: Option<u8>,
    #[serde(rename = "HEARTFAILURE", default)]
    pub heartfailure: Option<u8>,
    #[serde(rename = "CANCER", default)]
    pub cancer: Option<u8>,
    #[serde(rename = "PULMONARY", default)]
    pub pulmonary: Option<u8>,
    #[serde(rename = "OSTEOPOROSIS", default)]
    pub osteoporosis: Option<u8>,
    #[serde(rename = "RHEUMATOID", default)]
    pub rheumatoid: Option<u8>,
    #[serde(rename = "STROKE", default)]
    pub stroke: Option<u8>,
    #[serde(rename = "RENAL_DISEASE", default)]
    pub renal_disease: Option<u8>,

    // Utilization
    #[serde(rename = "IN_ADM", default)]
    pub inpatient_admissions: Option<f64>,
    #[serde(rename = "OUT_VISITS", default)]
    pub outpatient_visits: Option<f64>,
    #[serde(rename = "ED_VISITS", default)]
    pub ed_visits: Option<f64>,

    // Cost and adherence
    #[serde(rename = "TOTAL_CLAIMS_COST", default)]
    pub total_claims_cost: Option<f64>,
    #[serde(rename = "RX_ADH", default)]
    pub rx_adherence: Option<f64>,

    // Labs / vitals
    #[serde(rename = "BP_S", default)]
    pub systolic_bp: Option<f64>,
    #[serde(rename = "GLUCOSE", default)]
    pub glucose: Option<f64>,
    #[serde(rename = "HbA1c", default)]
    pub hba1c: Option<f64>,
    #[serde(rename = "CHOLESTEROL", default)]
    pub cholesterol: Option<f64>,
}

impl RawPatientRecord {
    /// Value of one chronic flag, absent → 0.
    pub fn chronic_flag(&self, name: &str) -> u8 {
        let flag = match name {
            "ALZHEIMER" => self.alzheimer,
            "HEARTFAILURE" => self.heartfailure,
            "CANCER" => self.cancer,
            "PULMONARY" => self.pulmonary,
            "OSTEOPOROSIS" => self.osteoporosis,
            "RHEUMATOID" => self.rheumatoid,
            "STROKE" => self.stroke,
            "RENAL_DISEASE" => self.renal_disease,
            _ => None,
        };
        flag.map(|v| if v > 0 { 1 } else { 0 }).unwrap_or(0)
    }

    /// Count of chronic conditions flagged present, in [0, 8].
    pub fn comorbidity_count(&self) -> u8 {
        CHRONIC_CONDITIONS
            .iter()
            .map(|c| self.chronic_flag(c))
            .sum()
    }

    /// Look up a numeric field by its column name, absent → 0.0.
    ///
    /// Used by the recommendation rule table to compare a raw value
    /// against its intervention threshold.
    pub fn numeric_field(&self, name: &str) -> f64 {
        let value = match name {
            "AGE" => self.age,
            "BMI" => self.bmi,
            "BP_S" => self.systolic_bp,
            "GLUCOSE" => self.glucose,
            "HbA1c" => self.hba1c,
            "CHOLESTEROL" => self.cholesterol,
            "TOTAL_CLAIMS_COST" => self.total_claims_cost,
            "IN_ADM" => self.inpatient_admissions,
            "OUT_VISITS" => self.outpatient_visits,
            "ED_VISITS" => self.ed_visits,
            "RX_ADH" => self.rx_adherence,
            _ => None,
        };
        value.unwrap_or(0.0)
    }
}
