//! carecast-model — Multi-horizon patient risk regression.
//!
//! Normalizes raw patient records into a fixed-order feature vector, trains
//! one bagged decision-tree ensemble per horizon (30/60/90 days), scores
//! batches, explains each 30-day prediction with a path-additive feature
//! attribution, and assembles the final prediction-output records.

pub mod attribution;
pub mod bundle;
pub mod config;
pub mod evaluate;
pub mod features;
pub mod forest;
pub mod predict;
pub mod scaler;
pub mod train;
pub mod tree;

pub use bundle::ModelBundle;
pub use config::TrainingConfig;
pub use features::{FeatureVector, Horizon, FEATURE_COLUMNS, N_FEATURES};
pub use predict::predict_batch;
pub use train::{train, HorizonReport, TrainingDataset};
