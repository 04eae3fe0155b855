//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const ANALYZE_URL_ENV: &str = "BENEFITS_ANALYZE_SITUATION_URL";
const GENERATE_URL_ENV: &str = "BENEFITS_GENERATE_RESPONSE_URL";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TuiConfig {
    /// Analyze-situation endpoint
    pub analyze_situation_url: Option<String>,
    /// Generate-response endpoint
    pub generate_response_url: Option<String>,
    /// Remote request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// Override for the local substitute's artificial delay
    pub mock_delay_ms: Option<u64>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("org", "benefits", "benefits-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory holding saved progress and the log file
    pub fn data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from a specific file; a missing file gives the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: TuiConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Non-empty environment values replace the endpoint URLs
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ANALYZE_URL_ENV).filter(|v| !v.is_empty()) {
            self.analyze_situation_url = Some(url);
        }
        if let Some(url) = lookup(GENERATE_URL_ENV).filter(|v| !v.is_empty()) {
            self.generate_response_url = Some(url);
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Artificial delays for the local substitute as (analyze, respond)
    pub fn mock_delays(&self) -> Option<(Duration, Duration)> {
        self.mock_delay_ms.map(|ms| {
            let delay = Duration::from_millis(ms);
            (delay, delay)
        })
    }
}
