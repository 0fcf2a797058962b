// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file support for certq
//!
//! Loads configuration from .certqrc.toml in current directory or ~/.config/certq/config.toml

use serde::Deserialize;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::vocab::Vocabulary;

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = ".certqrc.toml";
/// Environment variable naming the catalog path.
pub const CATALOG_ENV: &str = "CERTQ_CATALOG";
/// Catalog path used when nothing else names one.
pub const DEFAULT_CATALOG: &str = "data";
/// Result cap used when neither CLI nor config sets one.
pub const DEFAULT_MAX_RESULTS: usize = 120;

/// Output format for results (mirrored from cli for library use)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigOutputFormat {
    #[default]
    Text,
    Json,
}

/// Configuration loaded from .certqrc.toml or ~/.config/certq/config.toml
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog directory or bundle file
    pub catalog: Option<PathBuf>,
    /// Maximum number of results to return (0 = no cap)
    pub max_results: Option<usize>,
    /// Default output format (text or json)
    pub default_format: Option<String>,
    /// Extra search key aliases, e.g. `org = "provider"`
    pub search_aliases: HashMap<String, String>,
}

impl Config {
    /// Load configuration from files
    ///
    /// Precedence (highest to lowest):
    /// 1. .certqrc.toml in current directory
    /// 2. ~/.config/certq/config.toml
    pub fn load() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_from(&cwd, dirs::home_dir().as_deref())
    }

    /// Same search as [`Config::load`] with explicit directories. The first
    /// file found decides; if it does not parse, defaults are used.
    pub fn load_from(dir: &Path, home: Option<&Path>) -> Self {
        if let Some(config) = Self::load_from_path(&dir.join(LOCAL_CONFIG_FILE)) {
            return config;
        }

        if let Some(home) = home {
            let config_path = home.join(".config").join("certq").join("config.toml");
            if let Some(config) = Self::load_from_path(&config_path) {
                return config;
            }
        }

        Self::default()
    }

    fn load_from_path(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                Some(Self::default())
            }
        }
    }

    /// Get output format from config, parsing the string to ConfigOutputFormat
    pub fn output_format(&self) -> Option<ConfigOutputFormat> {
        self.default_format.as_ref().and_then(|s| match s.to_lowercase().as_str() {
            "json" => Some(ConfigOutputFormat::Json),
            "text" => Some(ConfigOutputFormat::Text),
            _ => None,
        })
    }

    /// Merge CLI options with config (CLI wins). `None` means uncapped.
    pub fn merge_max_results(&self, cli_value: Option<usize>) -> Option<usize> {
        let cap = cli_value
            .or(self.max_results)
            .unwrap_or(DEFAULT_MAX_RESULTS);
        (cap > 0).then_some(cap)
    }

    /// Catalog path: CLI, then `CERTQ_CATALOG`, then config, then `data`.
    pub fn catalog_path(&self, cli_value: Option<&Path>) -> PathBuf {
        self.resolve_catalog(cli_value, std::env::var_os(CATALOG_ENV))
    }

    fn resolve_catalog(&self, cli_value: Option<&Path>, env_value: Option<OsString>) -> PathBuf {
        if let Some(path) = cli_value {
            return path.to_path_buf();
        }
        if let Some(path) = env_value.filter(|v| !v.is_empty()) {
            return PathBuf::from(path);
        }
        self.catalog
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG))
    }

    /// Built-in vocabulary with the configured search aliases merged in.
    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary::with_aliases(&self.search_aliases)
    }
}
