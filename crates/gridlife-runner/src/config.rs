//! Runner configuration.

use anyhow::{Context, Result};
use gridlife_core::SimConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming a config file when no path argument is given
pub const CONFIG_ENV: &str = "GRIDLIFE_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub sim: SimConfig,
    /// Number of ticks to run
    pub num_ticks: u64,
    /// Emit population metrics every this many ticks (0 disables)
    pub report_every: u64,
    /// Log as JSON lines instead of human-readable text
    pub json_logs: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            num_ticks: 10_000,
            report_every: 100,
            json_logs: false,
        }
    }
}

impl RunnerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RunnerConfig =
            serde_json::from_str(json).context("malformed runner configuration")?;
        config.sim.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("loading {}", path.display()))
    }

    /// First CLI argument, then `GRIDLIFE_CONFIG`, then defaults
    pub fn load(arg: Option<String>) -> Result<Self> {
        match arg.or_else(|| std::env::var(CONFIG_ENV).ok()) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}
