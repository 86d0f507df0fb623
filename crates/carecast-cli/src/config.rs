//! Configuration loading for Carecast.
//! Reads carecast.toml from the current directory or the path in the
//! CARECAST_CONFIG env var; a missing file runs the deployed defaults.

use carecast_common::{CarecastError, Result};
use carecast_model::TrainingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarecastConfig {
    #[serde(default)]
    pub training: TrainingConfig,
    #[serde(default)]
    pub artifact: ArtifactConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Where `train` writes and `predict`/`evaluate` read the bundle.
    #[serde(default = "default_artifact_path")]
    pub path: String,
}

fn default_artifact_path() -> String { "models/risk_model.json".to_string() }

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            path: default_artifact_path(),
        }
    }
}

impl CarecastConfig {
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => std::env::var("CARECAST_CONFIG")
                .unwrap_or_else(|_| "carecast.toml".to_string())
                .into(),
        };

        if !path.exists() {
            // Only an explicitly requested config is required to exist.
            if explicit.is_some() {
                return Err(CarecastError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            tracing::info!("no carecast.toml found, using default configuration");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: CarecastConfig = toml::from_str(&content)
            .map_err(|e| CarecastError::Config(format!("{}: {e}", path.display())))?;
        tracing::info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }
}
