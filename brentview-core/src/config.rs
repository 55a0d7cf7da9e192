//! Dashboard configuration: resolved once at startup, then read-only.
//!
//! Layers, lowest precedence first:
//! 1. Built-in defaults
//! 2. TOML file (`BRENTVIEW_CONFIG`, else `<config_dir>/brentview/config.toml` when present)
//! 3. `BRENTVIEW_API_BASE` environment override

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{parse_date, DateParseError, DateRange};

pub const API_BASE_ENV: &str = "BRENTVIEW_API_BASE";
pub const CONFIG_PATH_ENV: &str = "BRENTVIEW_CONFIG";
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid default date: {0}")]
    InvalidDate(#[from] DateParseError),

    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// On-disk shape of the config file. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub api_base: Option<String>,
    pub default_start: Option<String>,
    pub default_end: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

/// Resolved configuration injected into the fetcher and the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Base URL without a trailing slash.
    pub api_base: String,
    /// Range selected at startup.
    pub default_range: DateRange,
    pub request_timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            default_range: DateRange::new(
                NaiveDate::from_ymd_opt(2012, 1, 1).unwrap_or_default(),
                NaiveDate::from_ymd_opt(2022, 9, 30).unwrap_or_default(),
            ),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl DashboardConfig {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(p) => Some(PathBuf::from(p)),
            None => Self::default_path().filter(|p| p.exists()),
        };
        let api_base = std::env::var(API_BASE_ENV).ok().filter(|s| !s.trim().is_empty());
        Self::resolve(path.as_deref(), api_base)
    }

    /// Resolve from an optional config file and an optional base URL override.
    pub fn resolve(path: Option<&Path>, api_base: Option<String>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        if let Some(url) = api_base {
            config.api_base = normalize_base_url(&url)?;
        }
        Ok(config)
    }

    /// `<config_dir>/brentview/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("brentview").join("config.toml"))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a TOML document and overlay it on the defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        Self::default().overlay(file)
    }

    fn overlay(mut self, file: ConfigFile) -> Result<Self, ConfigError> {
        if let Some(url) = file.api_base {
            self.api_base = normalize_base_url(&url)?;
        }
        if let Some(start) = file.default_start {
            self.default_range.start = parse_date(&start)?;
        }
        if let Some(end) = file.default_end {
            self.default_range.end = parse_date(&end)?;
        }
        if let Some(secs) = file.request_timeout_secs {
            if secs == 0 {
                return Err(ConfigError::ZeroTimeout);
            }
            self.request_timeout = Duration::from_secs(secs);
        }
        Ok(self)
    }
}

/// Validate an http(s) base URL and strip trailing slashes.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = reqwest::Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}
