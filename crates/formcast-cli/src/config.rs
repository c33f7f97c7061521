//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Environment variables (`FORMCAST_CONFIG`, logging overrides)
//! - Command-line arguments

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use crate::logging::{LogFormat, LoggingConfig};
use formcast_core::{ConditionPolicy, ValidatorConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding model documents
    pub models_dir: PathBuf,

    /// How model condition lists are evaluated
    pub condition_policy: ConditionPolicy,

    /// Cache resolved models for the lifetime of the process
    pub cache_models: bool,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LogSettings,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format used when `--output` is not given
    pub format: Option<OutputFormat>,

    /// Use colored output
    pub color: Option<bool>,
}

/// Logging settings from the config file; environment variables win
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log level (trace, debug, info, warn, error) or filter directives
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<LogFormat>,

    /// Log file path
    pub file: Option<PathBuf>,

    /// Per-module levels, e.g. `formcast_core: debug`
    pub modules: Option<HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("models"),
            condition_policy: ConditionPolicy::default(),
            cache_models: true,
            output: OutputConfig::default(),
            logging: LogSettings::default(),
        }
    }
}

impl LogSettings {
    /// Apply file settings on top of a verbosity-derived config
    pub fn apply_to(&self, config: &mut LoggingConfig) {
        if let Some(level) = &self.level {
            config.level = level.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(file) = &self.file {
            config.file = Some(file.clone());
        }
        if let Some(modules) = &self.modules {
            config.module_filter = Some(modules.clone());
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let config = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)
                .map_err(|e| Error::config(format!("{}: {e}", path.display())))?,
            _ => serde_json::from_str(&content)?,
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".formcast.yaml"),
            PathBuf::from(".formcast.json"),
            PathBuf::from(".formcast.toml"),
            PathBuf::from("formcast.yaml"),
            PathBuf::from("formcast.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let formcast_dir = config_dir.join("formcast");
            paths.push(formcast_dir.join("config.yaml"));
            paths.push(formcast_dir.join("config.json"));
            paths.push(formcast_dir.join("config.toml"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".formcast.yaml"));
            paths.push(home_dir.join(".formcast.json"));
        }

        paths
    }

    /// Model directory, with a command-line override
    pub fn models_dir<'a>(&'a self, cli_override: Option<&'a Path>) -> &'a Path {
        cli_override.unwrap_or(&self.models_dir)
    }

    /// Validator settings derived from this configuration
    pub fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig::new().with_condition_policy(self.condition_policy)
    }
}
