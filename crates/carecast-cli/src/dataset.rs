//! CSV dataset I/O.
//!
//! Claims extracts arrive with arbitrary column subsets and occasionally
//! non-numeric junk in numeric columns, so rows are parsed by header lookup
//! with lenient coercion: an unparseable or absent value becomes `None` and
//! defaults to 0 downstream.

use carecast_common::{CarecastError, RawPatientRecord, Result, RiskPrediction};
use carecast_model::train::{TrainingDataset, TrainingRow};
use carecast_model::Horizon;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

struct ColumnMap(HashMap<String, usize>);

impl ColumnMap {
    fn new(headers: &csv::StringRecord) -> Self {
        let map = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_string(), i))
            .collect();
        Self(map)
    }

    fn text(&self, row: &csv::StringRecord, column: &str) -> Option<String> {
        let idx = *self.0.get(column)?;
        let value = row.get(idx)?.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn numeric(&self, row: &csv::StringRecord, column: &str) -> Option<f64> {
        self.text(row, column).and_then(|v| v.parse::<f64>().ok())
    }

    fn flag(&self, row: &csv::StringRecord, column: &str) -> Option<u8> {
        self.numeric(row, column)
            .map(|v| if v > 0.0 { 1 } else { 0 })
    }
}

fn record_from_row(columns: &ColumnMap, row: &csv::StringRecord) -> RawPatientRecord {
    RawPatientRecord {
        id: columns.text(row, "DESYNPUF_ID").unwrap_or_default(),
        age: columns.numeric(row, "AGE"),
        gender: columns.flag(row, "GENDER"),
        bmi: columns.numeric(row, "BMI"),
        alzheimer: columns.flag(row, "ALZHEIMER"),
        heartfailure: columns.flag(row, "HEARTFAILURE"),
        cancer: columns.flag(row, "CANCER"),
        pulmonary: columns.flag(row, "PULMONARY"),
        osteoporosis: columns.flag(row, "OSTEOPOROSIS"),
        rheumatoid: columns.flag(row, "RHEUMATOID"),
        stroke: columns.flag(row, "STROKE"),
        renal_disease: columns.flag(row, "RENAL_DISEASE"),
        inpatient_admissions: columns.numeric(row, "IN_ADM"),
        outpatient_visits: columns.numeric(row, "OUT_VISITS"),
        ed_visits: columns.numeric(row, "ED_VISITS"),
        total_claims_cost: columns.numeric(row, "TOTAL_CLAIMS_COST"),
        rx_adherence: columns.numeric(row, "RX_ADH"),
        systolic_bp: columns.numeric(row, "BP_S"),
        glucose: columns.numeric(row, "GLUCOSE"),
        hba1c: columns.numeric(row, "HbA1c"),
        cholesterol: columns.numeric(row, "CHOLESTEROL"),
    }
}

/// Load a training table: raw feature columns plus the three target columns.
pub fn load_training_csv(path: &Path) -> Result<TrainingDataset> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| CarecastError::Csv(format!("{}: {e}", path.display())))?;
    let columns = ColumnMap::new(reader.headers()?);

    for horizon in Horizon::ALL {
        let target = horizon.target_column();
        if !columns.0.contains_key(target) {
            return Err(CarecastError::Csv(format!(
                "{}: missing target column {target}",
                path.display()
            )));
        }
    }

    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row?;
        rows.push(TrainingRow {
            record: record_from_row(&columns, &row),
            risk_30d: columns.numeric(&row, "RISK_30D").unwrap_or(0.0),
            risk_60d: columns.numeric(&row, "RISK_60D").unwrap_or(0.0),
            risk_90d: columns.numeric(&row, "RISK_90D").unwrap_or(0.0),
        });
    }
    info!(path = %path.display(), rows = rows.len(), "training dataset loaded");
    Ok(TrainingDataset { rows })
}

/// Load a batch of raw patient records for inference.
pub fn load_records_csv(path: &Path) -> Result<Vec<RawPatientRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| CarecastError::Csv(format!("{}: {e}", path.display())))?;
    let columns = ColumnMap::new(reader.headers()?);

    let mut records = Vec::new();
    for row in reader.records() {
        records.push(record_from_row(&columns, &row?));
    }
    info!(path = %path.display(), records = records.len(), "inference batch loaded");
    Ok(records)
}

/// Write prediction-output records in the collaborator column layout.
pub fn write_predictions_csv(path: &Path, predictions: &[RiskPrediction]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| CarecastError::Csv(format!("{}: {e}", path.display())))?;
    writer.write_record([
        "DESYNPUF_ID",
        "RISK_30D",
        "RISK_60D",
        "RISK_90D",
        "RISK_LABEL",
        "TOP_3_FEATURES",
        "AI_RECOMMENDATIONS",
    ])?;
    for p in predictions {
        writer.write_record([
            p.id.as_str(),
            &p.risk_30d.to_string(),
            &p.risk_60d.to_string(),
            &p.risk_90d.to_string(),
            p.label.as_str(),
            &p.top_features.join(", "),
            p.recommendation.as_str(),
        ])?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = predictions.len(), "predictions written");
    Ok(())
}
