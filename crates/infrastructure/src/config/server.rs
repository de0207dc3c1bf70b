//! HTTP server configuration.

use serde::{Deserialize, Serialize};

use super::default_true;
use crate::telemetry::{LogFormat, TelemetryConfig};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (empty = allow any origin)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Graceful shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: Option<u64>,

    /// Log format: "json" for structured JSON logs, "text" for human-readable
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter (e.g., "info", "gpt_api=debug,tower_http=info")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Maximum body size for JSON requests in bytes (default: 1MB)
    #[serde(default = "default_max_body")]
    pub max_body_size_bytes: usize,

    /// Include internal error details in 500 responses
    #[serde(default)]
    pub expose_internal_errors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

#[allow(clippy::unnecessary_wraps)]
const fn default_shutdown_timeout() -> Option<u64> {
    Some(30)
}

fn default_log_filter() -> String {
    "info".to_string()
}

const fn default_max_body() -> usize {
    1024 * 1024 // 1MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            allowed_origins: Vec::new(),
            shutdown_timeout_secs: default_shutdown_timeout(),
            log_format: LogFormat::default(),
            log_filter: default_log_filter(),
            max_body_size_bytes: default_max_body(),
            expose_internal_errors: false,
        }
    }
}

impl ServerConfig {
    /// Socket address string the listener binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Logging settings derived from this section
    #[must_use]
    pub fn telemetry(&self) -> TelemetryConfig {
        TelemetryConfig {
            log_filter: self.log_filter.clone(),
            log_format: self.log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_local_and_quiet() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert!(config.cors_enabled);
        assert!(config.allowed_origins.is_empty());
        assert_eq!(config.shutdown_timeout_secs, Some(30));
        assert_eq!(config.max_body_size_bytes, 1024 * 1024);
        assert!(!config.expose_internal_errors);
    }

    #[test]
    fn empty_section_deserializes_to_defaults() {
        let config: ServerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn telemetry_mirrors_log_settings() {
        let config = ServerConfig {
            log_format: LogFormat::Json,
            log_filter: "debug".to_string(),
            ..ServerConfig::default()
        };
        let telemetry = config.telemetry();
        assert_eq!(telemetry.log_format, LogFormat::Json);
        assert_eq!(telemetry.log_filter, "debug");
    }
}
