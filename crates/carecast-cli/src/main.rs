//! Carecast — Multi-horizon patient risk scoring pipeline.
//! Entry point for the `carecast` binary.

use anyhow::Context;
use carecast_cli::config::CarecastConfig;
use carecast_cli::dataset;
use carecast_model::evaluate::ConfusionMatrix;
use carecast_model::{predict_batch, train, ModelBundle};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "carecast", version, about = "Patient adverse-event risk scoring")]
struct Cli {
    /// Path to carecast.toml (defaults to ./carecast.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Train the three-horizon ensemble from a historical CSV.
    Train {
        /// Training table with feature and RISK_30D/60D/90D target columns.
        #[arg(long)]
        data: PathBuf,
        /// Artifact output path (overrides the configured one).
        #[arg(long)]
        model: Option<PathBuf>,
    },
    /// Score a batch of patient records.
    Predict {
        /// Input records CSV.
        #[arg(long)]
        input: PathBuf,
        /// Predictions CSV; printed as JSON lines when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        model: Option<PathBuf>,
    },
    /// Label-space confusion report of 30-day scores on a labeled CSV.
    Evaluate {
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        model: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("carecast=debug,info")),
        )
        .init();

    let cli = Cli::parse();
    info!("Carecast v{}", env!("CARGO_PKG_VERSION"));

    let config = CarecastConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Train { data, model } => {
            let dataset = dataset::load_training_csv(&data)?;
            let (bundle, reports) =
                train(&dataset, &config.training).context("training failed")?;
            for report in &reports {
                println!(
                    "--- {} --- MAE={:.3}, R²={:.3}",
                    report.horizon.target_column(),
                    report.mae,
                    report.r2
                );
            }
            let path = model.unwrap_or_else(|| PathBuf::from(&config.artifact.path));
            bundle.save(&path)?;
            println!("Model trained and saved to {}", path.display());
        }

        Command::Predict {
            input,
            output,
            model,
        } => {
            let path = model.unwrap_or_else(|| PathBuf::from(&config.artifact.path));
            let bundle = ModelBundle::load(&path)?;
            let records = dataset::load_records_csv(&input)?;
            let predictions = predict_batch(&bundle, &records);
            match output {
                Some(out) => dataset::write_predictions_csv(&out, &predictions)?,
                None => {
                    for prediction in &predictions {
                        println!("{}", serde_json::to_string(prediction)?);
                    }
                }
            }
        }

        Command::Evaluate { data, model } => {
            let path = model.unwrap_or_else(|| PathBuf::from(&config.artifact.path));
            let bundle = ModelBundle::load(&path)?;
            let dataset = dataset::load_training_csv(&data)?;
            let records: Vec<_> = dataset.rows.iter().map(|r| r.record.clone()).collect();
            let predictions = predict_batch(&bundle, &records);

            let actual: Vec<u8> = dataset
                .rows
                .iter()
                .map(|r| r.risk_30d.clamp(0.0, 100.0).round() as u8)
                .collect();
            let predicted: Vec<u8> = predictions.iter().map(|p| p.risk_30d).collect();
            println!("{}", ConfusionMatrix::from_scores(&actual, &predicted));
        }
    }

    Ok(())
}
