//! Error types shared across the pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CarecastError>;

#[derive(Debug, Error)]
pub enum CarecastError {
    #[error("insufficient training data: {rows} rows, at least {required} required")]
    InsufficientData { rows: usize, required: usize },

    #[error("model artifact error: {0}")]
    ArtifactLoad(String),

    #[error("feature schema mismatch: expected {expected:?}, artifact has {actual:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("attribution failed: {0}")]
    Attribution(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<csv::Error> for CarecastError {
    fn from(err: csv::Error) -> Self {
        CarecastError::Csv(err.to_string())
    }
}
