//! Tracing/logging initialization.
//!
//! Configuration is read from the environment:
//! - `RUST_LOG`: filter directives (default `info`)
//! - `DEPOT_LOG_FORMAT`: `json` (default) or `pretty`/`text`

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const FILTER_ENV: &str = "RUST_LOG";
pub const FORMAT_ENV: &str = "DEPOT_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid log format {0:?} (expected \"json\" or \"pretty\")")]
    InvalidLogFormat(String),
}

/// Output format of the fmt layer.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl core::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracingConfig {
    /// `EnvFilter` directives, e.g. `info,depot_warehouse=debug`.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
        }
    }
}

impl TracingConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let filter = lookup(FILTER_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());
        let format = match lookup(FORMAT_ENV) {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => LogFormat::default(),
        };
        Ok(Self { filter, format })
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// Initialize tracing/logging for the process from the environment.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    match TracingConfig::from_env() {
        Ok(config) => init_with(&config),
        Err(err) => {
            init_with(&TracingConfig::default());
            ::tracing::warn!(error = %err, "ignoring invalid logging configuration");
        }
    }
}

/// Initialize tracing/logging with an explicit configuration.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_with(config: &TracingConfig) {
    let filter =
        EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = TracingConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, TracingConfig::default());
        assert_eq!(config.filter, "info");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn reads_filter_and_format() {
        let config = TracingConfig::from_lookup(lookup_from(&[
            (FILTER_ENV, "depot_warehouse=debug"),
            (FORMAT_ENV, "Pretty"),
        ]))
        .unwrap();
        assert_eq!(config.filter, "depot_warehouse=debug");
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn rejects_unknown_format() {
        let err = TracingConfig::from_lookup(lookup_from(&[(FORMAT_ENV, "xml")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidLogFormat("xml".to_string()));
    }

    #[test]
    fn init_is_idempotent() {
        let config = TracingConfig::default().with_format(LogFormat::Pretty);
        init_with(&config);
        init_with(&config.clone().with_filter("debug"));
        crate::init();
    }

    #[test]
    fn format_serializes_lowercase() {
        let json = serde_json::to_string(&LogFormat::Pretty).unwrap();
        assert_eq!(json, "\"pretty\"");
    }
}
