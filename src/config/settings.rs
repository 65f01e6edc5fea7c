use thiserror::Error;

use crate::{constants, utils::logging::LogFormat};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime settings read from the environment (and `.env` via dotenv).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: constants::DEFAULT_APP_HOST.to_string(),
            port: constants::DEFAULT_APP_PORT,
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup(constants::ENV_APP_HOST)
            .filter(|host| !host.trim().is_empty())
            .unwrap_or(defaults.host);

        let port = match lookup(constants::ENV_APP_PORT) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                key: constants::ENV_APP_PORT,
                value: raw,
            })?,
            None => defaults.port,
        };

        let log_format = match lookup(constants::ENV_LOG_FORMAT) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: constants::ENV_LOG_FORMAT,
                value: raw,
            })?,
            None => defaults.log_format,
        };

        Ok(Self {
            host,
            port,
            log_format,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_address(), ("127.0.0.1".to_string(), 8000));
    }

    #[test]
    fn test_reads_every_key() {
        let config = AppConfig::from_lookup(lookup(&[
            ("APP_HOST", "0.0.0.0"),
            ("APP_PORT", "9090"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9090);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_port() {
        let err = AppConfig::from_lookup(lookup(&[("APP_PORT", "eighty")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "APP_PORT",
                value: "eighty".into()
            }
        );
    }

    #[test]
    fn test_invalid_log_format() {
        assert!(AppConfig::from_lookup(lookup(&[("LOG_FORMAT", "xml")])).is_err());
    }
}
