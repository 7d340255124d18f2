//! Configuration management
//!
//! This module handles loading and managing configuration from:
//! - Command-line arguments
//! - Environment variables
//! - Configuration files (TOML)
//! - Defaults

use crate::automaton::{ConversionOptions, SymbolPolicy, subset::DEFAULT_MAX_DFA_STATES};
use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub symbols: SymbolConfig,

    #[serde(default)]
    pub conversion: ConversionConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Symbol parsing settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SymbolConfig {
    /// How malformed encodings are handled (lenient, strict)
    #[serde(default)]
    pub policy: SymbolPolicy,
}

/// Subset construction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Maximum number of DFA states, 0 for no limit
    #[serde(default = "default_max_dfa_states")]
    pub max_dfa_states: usize,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Default output format when the CLI does not specify one
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_max_dfa_states() -> usize {
    DEFAULT_MAX_DFA_STATES
}

fn default_format() -> OutputFormat {
    OutputFormat::Dot
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_dfa_states: default_max_dfa_states(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ConversionConfig {
    pub fn options(&self) -> ConversionOptions {
        match self.max_dfa_states {
            0 => ConversionOptions::unbounded(),
            limit => ConversionOptions::default().with_max_states(limit),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file {:?}: {}", path, e)))?;

        Ok(config)
    }

    /// Read the explicit config file, or the first one found in the default
    /// locations. Also returns the path that was read, if any, so callers
    /// can report it once logging is up.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<(Self, Option<PathBuf>)> {
        match explicit.or_else(Self::locate) {
            Some(path) => Ok((Self::from_file(&path)?, Some(path))),
            None => Ok((Config::default(), None)),
        }
    }

    /// First existing config file among the default locations
    ///
    /// Searches in order:
    /// 1. ./gesture-dfa.toml
    /// 2. ~/.gesture-dfa/config.toml
    /// 3. /etc/gesture-dfa/config.toml
    pub fn locate() -> Option<PathBuf> {
        let mut paths = vec![PathBuf::from("gesture-dfa.toml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".gesture-dfa").join("config.toml"));
        }
        paths.push(PathBuf::from("/etc/gesture-dfa/config.toml"));

        paths.into_iter().find(|path| path.exists())
    }

    /// Serialize the configuration back to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}
