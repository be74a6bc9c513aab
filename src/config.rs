//! Process configuration loaded from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::observability::LogFormat;

/// Shared secret used when `API_KEY` is not set.
pub const DEFAULT_API_KEY: &str = "set-a-strong-secret";

/// Default port when neither `HTTP_PORT` nor `PORT` is set.
pub const DEFAULT_HTTP_PORT: u16 = 8000;

/// Default request body cap (50 MiB). Base64 inflates files by a third.
pub const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Invalid configuration value.
#[derive(Debug, Error)]
#[error("{name} must be {expected}, got {value:?}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Server configuration.
#[derive(Debug)]
pub struct Config {
    /// Address to bind.
    pub host: IpAddr,
    /// Port to bind.
    pub http_port: u16,
    /// Value `X-API-Key` must match on `/process`. `None` disables the check.
    pub api_key: Option<SecretString>,
    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            http_port: DEFAULT_HTTP_PORT,
            api_key: Some(SecretString::from(DEFAULT_API_KEY.to_string())),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `API_KEY` | `set-a-strong-secret` (empty string disables auth) |
    /// | `HTTP_HOST` | `0.0.0.0` |
    /// | `HTTP_PORT`, then `PORT` | `8000` |
    /// | `MAX_BODY_BYTES` | 50 MiB |
    /// | `LOG_FORMAT` | `pretty` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Not trimmed: an explicitly empty key turns authentication off.
        if let Some(key) = lookup("API_KEY") {
            config.api_key = if key.is_empty() {
                None
            } else {
                Some(SecretString::from(key))
            };
        }

        if let Some(host) = non_empty(&lookup, "HTTP_HOST") {
            config.host = host.parse().map_err(|_| ConfigError {
                name: "HTTP_HOST",
                value: host.clone(),
                expected: "an IP address",
            })?;
        }

        let port = non_empty(&lookup, "HTTP_PORT")
            .map(|v| ("HTTP_PORT", v))
            .or_else(|| non_empty(&lookup, "PORT").map(|v| ("PORT", v)));
        if let Some((name, value)) = port {
            config.http_port = value.parse().map_err(|_| ConfigError {
                name,
                value: value.clone(),
                expected: "a port number",
            })?;
        }

        if let Some(value) = non_empty(&lookup, "MAX_BODY_BYTES") {
            config.max_body_bytes = value
                .parse()
                .ok()
                .filter(|bytes: &usize| *bytes > 0)
                .ok_or_else(|| ConfigError {
                    name: "MAX_BODY_BYTES",
                    value: value.clone(),
                    expected: "a positive integer",
                })?;
        }

        if let Some(value) = non_empty(&lookup, "LOG_FORMAT") {
            config.log_format = value.parse().map_err(|_| ConfigError {
                name: "LOG_FORMAT",
                value: value.clone(),
                expected: "\"pretty\" or \"json\"",
            })?;
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.http_port)
    }

    /// True when the built-in placeholder secret is still in effect.
    pub fn uses_default_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .map_or(false, |key| key.expose_secret() == DEFAULT_API_KEY)
    }
}

fn non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).expect("defaults should load");

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8000");
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.uses_default_api_key());
    }

    #[test]
    fn test_api_key_override_and_disable() {
        let config = config_from(&[("API_KEY", "s3cret")]).expect("load");
        assert_eq!(
            config.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("s3cret".to_string())
        );
        assert!(!config.uses_default_api_key());

        let config = config_from(&[("API_KEY", "")]).expect("load");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_debug_output_redacts_api_key() {
        let config = config_from(&[("API_KEY", "very-private-value")]).expect("load");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("very-private-value"));
    }

    #[test]
    fn test_port_precedence() {
        let config = config_from(&[("PORT", "9000")]).expect("load");
        assert_eq!(config.http_port, 9000);

        let config = config_from(&[("HTTP_PORT", "9100"), ("PORT", "9000")]).expect("load");
        assert_eq!(config.http_port, 9100);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = config_from(&[("HTTP_PORT", "eighty")]).expect_err("should fail");
        assert_eq!(err.name, "HTTP_PORT");

        let err = config_from(&[("MAX_BODY_BYTES", "0")]).expect_err("should fail");
        assert_eq!(err.name, "MAX_BODY_BYTES");

        let err = config_from(&[("HTTP_HOST", "not-an-ip")]).expect_err("should fail");
        assert_eq!(err.name, "HTTP_HOST");

        let err = config_from(&[("LOG_FORMAT", "xml")]).expect_err("should fail");
        assert_eq!(err.name, "LOG_FORMAT");
    }

    #[test]
    fn test_json_logs_and_body_limit() {
        let config = config_from(&[("LOG_FORMAT", "json"), ("MAX_BODY_BYTES", "1024")])
            .expect("load");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.max_body_bytes, 1024);
    }
}
