use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pdata::Format;
use serde::Deserialize;

use crate::cli::CliConfig;
use crate::constants::CONFIG_FILE_NAME;

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub default_format: Option<Format>,
    pub pretty_json: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let Some(keys) = self.unknown_fields() {
            tracing::warn!(fields = %keys, "Unknown fields in config file (possible typos)");
        }
    }

    fn unknown_fields(&self) -> Option<String> {
        match &self.extra {
            serde_json::Value::Object(map) if !map.is_empty() => Some(
                map.keys()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            _ => None,
        }
    }
}

/// Final merged application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub default_format: Format,
    pub pretty_json: bool,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. CLI-specified config path OR `pdatactl.json` in the working directory
    /// 3. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let path = match &cli.config {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Some(path.clone())
            }
            None => {
                let local = PathBuf::from(CONFIG_FILE_NAME);
                if local.exists() { Some(local) } else { None }
            }
        };
        Self::load_with(cli, path.as_deref())
    }

    fn load_with(cli: &CliConfig, path: Option<&Path>) -> Result<Self> {
        let file_config = match path {
            Some(path) => {
                let config = FileConfig::load_from_file(path)?;
                config.warn_unknown_fields();
                config
            }
            None => FileConfig::default(),
        };
        Ok(Self::layer(cli, file_config))
    }

    fn layer(cli: &CliConfig, file: FileConfig) -> Self {
        let config = Self {
            default_format: cli
                .default_format
                .or(file.default_format)
                .unwrap_or_default(),
            pretty_json: cli.pretty.or(file.pretty_json).unwrap_or(false),
        };
        tracing::debug!(
            default_format = %config.default_format,
            pretty_json = config.pretty_json,
            "Configuration loaded"
        );
        config
    }
}
