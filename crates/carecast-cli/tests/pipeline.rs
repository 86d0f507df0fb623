//! End-to-end pipeline test: CSV in → train → persist → reload → score →
//! CSV out.

use carecast_cli::dataset;
use carecast_model::{predict_batch, train, ModelBundle, TrainingConfig};
use std::fmt::Write as _;

fn synthetic_training_csv(rows: usize) -> String {
    let mut csv = String::from(
        "DESYNPUF_ID,AGE,GENDER,HEARTFAILURE,GLUCOSE,TOTAL_CLAIMS_COST,RISK_30D,RISK_60D,RISK_90D\n",
    );
    for i in 0..rows {
        let age = 40 + (i % 50);
        let heartfailure = (i % 3 == 0) as u8;
        let glucose = 80 + (i % 7) * 15;
        let cost = (i % 4) * 5000;
        let risk = ((age - 40) * 2) as f64;
        writeln!(
            csv,
            "SYN{i:05},{age},{},{heartfailure},{glucose},{cost},{:.1},{:.1},{:.1}",
            i % 2,
            risk,
            risk * 0.8,
            risk * 0.6
        )
        .unwrap();
    }
    csv
}

#[test]
fn test_train_persist_reload_predict() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("risk_training.csv");
    std::fs::write(&data_path, synthetic_training_csv(240)).unwrap();

    let training = dataset::load_training_csv(&data_path).unwrap();
    assert_eq!(training.rows.len(), 240);

    let (bundle, reports) = train(&training, &TrainingConfig::default()).unwrap();
    assert_eq!(reports.len(), 3);
    for report in &reports {
        assert!(report.mae.is_finite() && report.mae >= 0.0);
    }

    let model_path = dir.path().join("models").join("risk_model.json");
    bundle.save(&model_path).unwrap();
    let reloaded = ModelBundle::load(&model_path).unwrap();

    // The documented reference patient: GENDER=1, AGE=80, HEARTFAILURE=1.
    let input_path = dir.path().join("patients.csv");
    std::fs::write(
        &input_path,
        "DESYNPUF_ID,GENDER,AGE,HEARTFAILURE\n00070B63745BE497,1,80,1\n",
    )
    .unwrap();
    let records = dataset::load_records_csv(&input_path).unwrap();

    let first = predict_batch(&reloaded, &records);
    let second = predict_batch(&reloaded, &records);
    assert_eq!(first, second, "same bundle and record must reproduce exactly");

    let prediction = &first[0];
    assert_eq!(prediction.id, "00070B63745BE497");
    assert!(prediction.risk_30d <= 100 && prediction.risk_60d <= 100 && prediction.risk_90d <= 100);
    assert!(prediction.top_features.len() <= 3);

    // Recommendation text is numbered and capped at three entries.
    let entries: Vec<&str> = prediction.recommendation.split(" | ").collect();
    assert!(!entries.is_empty() && entries.len() <= 3);
    for (i, entry) in entries.iter().enumerate() {
        assert!(entry.starts_with(&format!("{}. ", i + 1)));
    }

    let out_path = dir.path().join("predictions.csv");
    dataset::write_predictions_csv(&out_path, &first).unwrap();
    let text = std::fs::read_to_string(&out_path).unwrap();
    assert!(text.starts_with("DESYNPUF_ID,RISK_30D,RISK_60D,RISK_90D,RISK_LABEL"));
    assert!(text.contains("00070B63745BE497"));
}

#[test]
fn test_tiny_dataset_refuses_to_train() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("risk_training.csv");
    std::fs::write(&data_path, synthetic_training_csv(3)).unwrap();
    let training = dataset::load_training_csv(&data_path).unwrap();
    let err = train(&training, &TrainingConfig::default()).unwrap_err();
    assert!(err.to_string().contains("insufficient training data"));
}
