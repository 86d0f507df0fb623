//! The trained model artifact: three fitted regressors plus the frozen
//! column orders, serialized as one versioned JSON file.
//!
//! Persisting goes through a temp file and rename so a concurrent loader
//! never observes a partially written artifact. Loading validates the format
//! version and the feature schema; a bundle that fails either check aborts
//! the whole batch rather than scoring anything with it.

use crate::features::{Horizon, FEATURE_COLUMNS};
use crate::forest::RandomForest;
use crate::scaler::StandardScaler;
use carecast_common::{CarecastError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Bump when the serialized layout changes.
pub const FORMAT_VERSION: u32 = 1;

/// Fitted scaler + forest pair for one horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorizonModel {
    pub scaler: StandardScaler,
    pub forest: RandomForest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    pub version: u32,
    pub trained_at: DateTime<Utc>,
    pub feature_columns: Vec<String>,
    pub target_columns: Vec<String>,
    pub risk_30d: HorizonModel,
    pub risk_60d: HorizonModel,
    pub risk_90d: HorizonModel,
}

impl ModelBundle {
    pub fn new(risk_30d: HorizonModel, risk_60d: HorizonModel, risk_90d: HorizonModel) -> Self {
        Self {
            version: FORMAT_VERSION,
            trained_at: Utc::now(),
            feature_columns: FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect(),
            target_columns: Horizon::ALL
                .iter()
                .map(|h| h.target_column().to_string())
                .collect(),
            risk_30d,
            risk_60d,
            risk_90d,
        }
    }

    pub fn horizon(&self, horizon: Horizon) -> &HorizonModel {
        match horizon {
            Horizon::Days30 => &self.risk_30d,
            Horizon::Days60 => &self.risk_60d,
            Horizon::Days90 => &self.risk_90d,
        }
    }

    /// Atomic persist: write the full JSON next to `path`, then rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = path.with_extension("tmp");
        let json = serde_json::to_vec(self)?;
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;
        info!(path = %path.display(), "model artifact saved");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            CarecastError::ArtifactLoad(format!("cannot read {}: {e}", path.display()))
        })?;
        let bundle: ModelBundle = serde_json::from_slice(&bytes).map_err(|e| {
            CarecastError::ArtifactLoad(format!("corrupt artifact {}: {e}", path.display()))
        })?;
        bundle.validate()?;
        info!(
            path = %path.display(),
            trained_at = %bundle.trained_at,
            "model artifact loaded"
        );
        Ok(bundle)
    }

    /// Reject artifacts from a different format version or feature schema.
    pub fn validate(&self) -> Result<()> {
        if self.version != FORMAT_VERSION {
            return Err(CarecastError::ArtifactLoad(format!(
                "unsupported artifact version {} (expected {FORMAT_VERSION})",
                self.version
            )));
        }
        let expected: Vec<String> = FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect();
        if self.feature_columns != expected {
            return Err(CarecastError::SchemaMismatch {
                expected,
                actual: self.feature_columns.clone(),
            });
        }
        Ok(())
    }
}
