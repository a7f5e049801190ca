// Voltsim - Synthetic household energy telemetry
// Copyright (c) 2026 Voltra Engineering
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Publisher configuration.
//!
//! Loaded from a JSON file; any field left out falls back to the
//! defaults below, so a minimal config only names the datastore.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use voltsim::{default_household, ApplianceProfile, ProfileError, DEVICE_ID};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),
}

/// Publisher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublisherConfig {
    /// Base URL of the Realtime Database instance.
    pub database_url: String,

    /// Auth token appended to every sink request, if required.
    pub auth_token: Option<String>,

    /// Device identifier stamped on every record.
    pub device_id: String,

    /// Tick period in seconds.
    pub interval_seconds: f64,

    /// Random seed for reproducible runs; entropy-seeded when absent.
    pub seed: Option<u64>,

    /// Appliance profile table.
    pub appliances: Vec<ApplianceProfile>,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            database_url: "https://voltra-sim-default-rtdb.firebaseio.com".to_string(),
            auth_token: None,
            device_id: DEVICE_ID.to_string(),
            interval_seconds: 30.0,
            seed: None,
            appliances: default_household(),
        }
    }
}

impl PublisherConfig {
    /// Load configuration from a JSON file and validate its profiles.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every appliance profile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for profile in &self.appliances {
            profile.validate()?;
        }
        Ok(())
    }
}
