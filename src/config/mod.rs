use crate::launch::{PlayerEntry, PlayerRoster, DEFAULT_PROMPT};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ChooserConfig {
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub chooser: ChooserConfig,
    /// Roster additions and overrides, merged over the built-in players.
    #[serde(default, rename = "player")]
    pub players: Vec<PlayerEntry>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn get_logging_format(&self) -> &str {
        &self.logging.format
    }

    pub fn get_prompt(&self) -> &str {
        self.chooser.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }

    pub fn build_roster(&self) -> Result<PlayerRoster> {
        let mut roster = PlayerRoster::embedded()?;
        roster.merge(&self.players);
        Ok(roster)
    }
}
