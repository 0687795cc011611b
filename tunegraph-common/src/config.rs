//! Engine configuration loading
//!
//! The engine is configured from an optional TOML file. Every field has a
//! compiled default so a missing file or an empty table is a valid
//! configuration; a file that exists but fails to parse is an error (a
//! half-applied configuration is worse than none).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Concurrent search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Discovery playlist settings
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

/// Settings for the concurrent multi-criteria search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Per-task completion deadline in milliseconds.
    ///
    /// A criterion task that has not finished within this bound fails the
    /// whole search. Default: 5000 ms.
    #[serde(default = "default_task_timeout_ms")]
    pub task_timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            task_timeout_ms: default_task_timeout_ms(),
        }
    }
}

fn default_task_timeout_ms() -> u64 {
    5000
}

/// Settings for discovery playlist scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// How many similar songs each favorite contributes to the score pool.
    ///
    /// Default: 10.
    #[serde(default = "default_per_favorite")]
    pub per_favorite: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            per_favorite: default_per_favorite(),
        }
    }
}

fn default_per_favorite() -> usize {
    10
}

impl EngineConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Load a configuration from a TOML file.
    ///
    /// A missing file yields the compiled defaults; an unreadable or
    /// unparseable file is an error.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No engine config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "Loaded engine config");
        Ok(config)
    }
}
