// src/core/config_manager.rs
//! Application configuration: optional YAML file, then environment, then CLI overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_CONFIG_FILE: &str = "jobscout.yaml";
pub const DEFAULT_DATABASE_FILE: &str = "my_job_tracker.db";
pub const DEFAULT_BASE_URL: &str = "https://serpapi.com";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub database_path: PathBuf,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub api_key: String,
    pub base_url: String,
    /// Language hint sent as `hl` with every jobs search
    pub language: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            database_path: PathBuf::from(DEFAULT_DATABASE_FILE),
            server: ServerConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: "en".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path` (or `jobscout.yaml` when present), then
    /// apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    info!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.database_path = resolve_path(&config.database_path)?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply overrides from an environment lookup. Takes the lookup as a
    /// closure so tests don't have to touch the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("SERPAPI_API_KEY") {
            self.search.api_key = key;
        }
        if let Some(url) = lookup("SERPAPI_BASE_URL") {
            self.search.base_url = url;
        }
        if let Some(path) = lookup("JOBSCOUT_DATABASE") {
            self.database_path = PathBuf::from(path);
        }
        if let Some(port) = lookup("JOBSCOUT_PORT") {
            self.server.port = port
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("JOBSCOUT_PORT must be a valid port number"))?;
        }
        Ok(())
    }

    pub fn with_database_path(mut self, path: PathBuf) -> Self {
        self.database_path = path;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.server.port = port;
        self
    }
}

fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Ok(current_dir.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.database_path, PathBuf::from("my_job_tracker.db"));
        assert_eq!(config.search.base_url, "https://serpapi.com");
        assert_eq!(config.search.language, "en");
        assert!(config.search.api_key.is_empty());
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml(
            "search:\n  api_key: abc123\nserver:\n  port: 9100\n",
        )
        .unwrap();
        assert_eq!(config.search.api_key, "abc123");
        assert_eq!(config.search.timeout_seconds, 30);
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.address, "127.0.0.1");
    }

    #[test]
    fn test_empty_yaml() {
        let config = AppConfig::from_yaml("  \n").unwrap();
        assert_eq!(config.search.language, "en");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SERPAPI_API_KEY", "from-env"),
            ("JOBSCOUT_DATABASE", "/tmp/jobs.db"),
            ("JOBSCOUT_PORT", "8123"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.search.api_key, "from-env");
        assert_eq!(config.database_path, PathBuf::from("/tmp/jobs.db"));
        assert_eq!(config.server.port, 8123);
        assert_eq!(config.search.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_port_env() {
        let mut config = AppConfig::default();
        let result = config.apply_env(|key| {
            (key == "JOBSCOUT_PORT").then(|| "not-a-port".to_string())
        });
        assert!(result.is_err());
    }
}
