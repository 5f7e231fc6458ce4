//! Host configuration, loaded from an optional JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use invaders_core::constants::TICK_RATE;
use invaders_sim::engine::SimConfig;

/// Everything the binary needs to start a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sim: SimConfig,
    /// Where the best score is kept between runs.
    pub high_score_path: PathBuf,
    /// Loop frequency in Hz.
    pub tick_rate: u32,
    /// Stop the loop after this many seconds even if the game is still on.
    pub max_runtime_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            high_score_path: PathBuf::from("starfall_highscore.json"),
            tick_rate: TICK_RATE,
            max_runtime_secs: None,
        }
    }
}

impl AppConfig {
    /// Read `path` if given, defaults otherwise. Missing fields fall back to
    /// their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&json)
            .with_context(|| format!("parsing config {}", path.display()))?;
        anyhow::ensure!(config.tick_rate > 0, "tick_rate must be positive");
        Ok(config)
    }
}
