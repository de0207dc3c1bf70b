//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server and logging settings
//! - `api`: metadata advertised in the specification document
//!
//! Sources are layered: built-in defaults, then an optional TOML file,
//! then `GPT_API__`-prefixed environment variables
//! (e.g. `GPT_API__SERVER__PORT=8080`).

mod api;
mod server;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use api::ApiInfoConfig;
pub use server::ServerConfig;

/// Prefix of environment variables overriding the configuration
pub const ENV_PREFIX: &str = "GPT_API";

/// Separator between the prefix and nested keys in environment variables
pub const ENV_SEPARATOR: &str = "__";

/// Configuration file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "config";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// API metadata
    #[serde(default)]
    pub api: ApiInfoConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional `config.toml`
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(None, None)
    }

    /// Load configuration from a specific file, with environment overrides
    ///
    /// Unlike [`AppConfig::load`], the file must exist.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(Some(path), None)
    }

    /// Layer the sources; `env` replaces the process environment when given
    fn build(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            // Load from file
            .add_source(file)
            // Override with environment variables (e.g., GPT_API__SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true)
                    .source(env),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(
            host = %config.server.host,
            port = config.server.port,
            title = %config.api.title,
            "Configuration loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, io::Write};

    use super::*;
    use crate::telemetry::LogFormat;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_any_source() {
        let config = AppConfig::build(None, Some(HashMap::new())).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.api.title, "GPT Action API");
    }

    #[test]
    fn file_values_are_read() {
        let file = write_config(
            r#"
[server]
port = 8080
log_format = "json"
allowed_origins = ["https://chat.openai.com"]

[api]
url = "https://theapi.example.com"
title = "The API"
policy_text = "This is a privacy policy"
"#,
        );

        let config = AppConfig::build(Some(file.path()), Some(HashMap::new())).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.server.allowed_origins, ["https://chat.openai.com"]);
        assert_eq!(config.api.url, "https://theapi.example.com");
        assert_eq!(config.api.title, "The API");
        assert_eq!(
            config.api.policy_text.as_deref(),
            Some("This is a privacy policy")
        );
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_config("[server]\nport = 8080\n");
        let env = HashMap::from([
            ("GPT_API__SERVER__PORT".to_string(), "9090".to_string()),
            ("GPT_API__API__TITLE".to_string(), "From env".to_string()),
            (
                "GPT_API__SERVER__ALLOWED_ORIGINS".to_string(),
                "https://a.example,https://b.example".to_string(),
            ),
        ]);

        let config = AppConfig::build(Some(file.path()), Some(env)).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.api.title, "From env");
        assert_eq!(
            config.server.allowed_origins,
            ["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn explicit_file_must_exist() {
        let result = AppConfig::load_from(Path::new("/nonexistent/gpt-api.toml"));
        assert!(result.is_err());
    }
}
