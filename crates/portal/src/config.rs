//! Portal configuration from the environment.

use std::path::PathBuf;
use std::time::Duration;

use hrm_auth::FixedLatency;
use hrm_observability::LogFormat;
use thiserror::Error;

pub const DATA_DIR_VAR: &str = "HRM_DATA_DIR";
pub const LOGIN_LATENCY_VAR: &str = "HRM_LOGIN_LATENCY_MS";
pub const LOG_FORMAT_VAR: &str = "HRM_LOG_FORMAT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of milliseconds, got {value:?}")]
    InvalidLatency { var: &'static str, value: String },

    #[error("{var}: {reason}")]
    InvalidLogFormat { var: &'static str, reason: String },

    #[error("failed to resolve an app data directory; set HRM_DATA_DIR")]
    NoDataDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Directory holding the persisted session slot.
    pub data_dir: PathBuf,
    /// Simulated round trip of a login attempt.
    pub login_latency: Duration,
    pub log_format: LogFormat,
}

impl PortalConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir().ok_or(ConfigError::NoDataDir)?,
        };

        let login_latency = match lookup(LOGIN_LATENCY_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidLatency {
                    var: LOGIN_LATENCY_VAR,
                    value: raw,
                })?,
            None => FixedLatency::DEFAULT,
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|reason| ConfigError::InvalidLogFormat {
                    var: LOG_FORMAT_VAR,
                    reason,
                })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            data_dir,
            login_latency,
            log_format,
        })
    }
}

fn default_data_dir() -> Option<PathBuf> {
    let base = dirs::data_local_dir().or_else(|| {
        dirs::home_dir().map(|mut h| {
            h.push(".local");
            h.push("share");
            h
        })
    })?;
    Some(base.join("hrm-portal"))
}
