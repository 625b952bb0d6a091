use crate::providers::cnb::DEFAULT_FEED_URL;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Address of the daily rate listing
    pub feed_url: String,
    /// Currency every feed rate is quoted in
    pub base_currency: String,
    /// Address the HTTP server binds to
    pub listen_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            feed_url: DEFAULT_FEED_URL.to_string(),
            base_currency: "CZK".to_string(),
            listen_addr: "127.0.0.1:5000".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the default config file, falling back to built-in defaults when there is none.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("cz", "cnb-fx", "cnb-fx")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
