use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use validator::Validate;

use crate::schema_catalog::ResolveMode;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Server configuration with validation
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP server host address
    #[validate(length(min = 1, message = "HTTP host cannot be empty"))]
    pub http_host: String,

    /// HTTP server port (1-65535)
    #[validate(range(
        min = 1,
        max = 65535,
        message = "HTTP port must be between 1 and 65535"
    ))]
    pub http_port: u16,

    /// Schema YAML describing tables, columns and hierarchy levels
    #[validate(length(min = 1, message = "Schema path cannot be empty"))]
    pub schema_path: String,

    /// Render unknown tables and columns as written instead of failing
    pub passthrough_unknown: bool,

    /// Per-request timeout in seconds
    #[validate(range(
        min = 1,
        max = 300,
        message = "Request timeout must be between 1 and 300 seconds"
    ))]
    pub request_timeout_secs: u64,

    /// Largest accepted request body
    #[validate(range(
        min = 1024,
        max = 16777216,
        message = "Max body size must be between 1 KiB and 16 MiB"
    ))]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_host: "0.0.0.0".to_string(),
            http_port: 8080,
            schema_path: "schemas/commerce.yaml".to_string(),
            passthrough_unknown: false,
            request_timeout_secs: 30,
            max_body_bytes: 64 * 1024,
        }
    }
}

impl ServerConfig {
    /// Create configuration from environment variables with validation.
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Self {
            http_host: env::var("SCHEMAQL_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: parse_env_var("SCHEMAQL_PORT", "8080")?,
            schema_path: env::var("SCHEMAQL_SCHEMA")
                .unwrap_or_else(|_| "schemas/commerce.yaml".to_string()),
            passthrough_unknown: parse_env_var("SCHEMAQL_PASSTHROUGH", "false")?,
            request_timeout_secs: parse_env_var("SCHEMAQL_TIMEOUT_SECS", "30")?,
            max_body_bytes: parse_env_var("SCHEMAQL_MAX_BODY_BYTES", "65536")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from CLI arguments with validation
    pub fn from_cli(cli: CliConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            http_host: cli.http_host,
            http_port: cli.http_port,
            schema_path: cli.schema_path,
            passthrough_unknown: cli.passthrough_unknown,
            request_timeout_secs: cli
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
            max_body_bytes: cli.max_body_bytes.unwrap_or(defaults.max_body_bytes),
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file; missing keys take defaults
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn resolve_mode(&self) -> ResolveMode {
        if self.passthrough_unknown {
            ResolveMode::PassthroughOnMiss
        } else {
            ResolveMode::Strict
        }
    }
}

/// CLI configuration (parsed from command line arguments)
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub http_host: String,
    pub http_port: u16,
    pub schema_path: String,
    pub passthrough_unknown: bool,
    pub request_timeout_secs: Option<u64>,
    pub max_body_bytes: Option<usize>,
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
