//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SITEDECK_HOST` - Bind address (default: 127.0.0.1)
//! - `SITEDECK_PORT` - Listen port (default: 3001)
//! - `SITEDECK_STORAGE` - `file` or `memory` (default: file)
//! - `SITEDECK_DATA_DIR` - Directory for JSON files (default: ./data)
//! - `SITEDECK_STATIC_DIR` - Stylesheets and scripts (default: crates/admin/static)
//! - `SITEDECK_MAX_UPLOAD_BYTES` - Largest accepted media upload (default: 5 MiB)
//! - `SITEDECK_EDITOR_API_KEY` - Key handed to the rich-text editor widget
//! - `SITEDECK_LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 0.0)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where dashboard data lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Nothing survives a restart.
    Memory,
    /// One JSON file per key under `data_dir`.
    File { data_dir: PathBuf },
}

/// Admin application configuration.
#[derive(Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Storage backend
    pub storage: StorageConfig,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Largest accepted media upload in bytes
    pub max_upload_bytes: usize,
    /// API key for the hosted rich-text editor (optional)
    pub editor_api_key: Option<SecretString>,
    /// Emit JSON logs instead of text
    pub json_logs: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("storage", &self.storage)
            .field("static_dir", &self.static_dir)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field(
                "editor_api_key",
                &self.editor_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("json_logs", &self.json_logs)
            .field("sentry_dsn", &self.sentry_dsn)
            .field("sentry_environment", &self.sentry_environment)
            .field("sentry_sample_rate", &self.sentry_sample_rate)
            .field("sentry_traces_sample_rate", &self.sentry_traces_sample_rate)
            .finish()
    }
}

impl Default for AdminConfig {
    /// Local defaults with in-memory storage.
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3001,
            storage: StorageConfig::Memory,
            static_dir: PathBuf::from("crates/admin/static"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            editor_api_key: None,
            json_logs: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = parse_var("SITEDECK_HOST", &or_default("SITEDECK_HOST", "127.0.0.1"))?;
        let port = parse_var("SITEDECK_PORT", &or_default("SITEDECK_PORT", "3001"))?;
        let data_dir = PathBuf::from(or_default("SITEDECK_DATA_DIR", "data"));
        let storage = match or_default("SITEDECK_STORAGE", "file").to_lowercase().as_str() {
            "file" => StorageConfig::File { data_dir },
            "memory" => StorageConfig::Memory,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "SITEDECK_STORAGE".to_string(),
                    format!("expected `file` or `memory`, got `{other}`"),
                ));
            }
        };
        let static_dir = PathBuf::from(or_default("SITEDECK_STATIC_DIR", "crates/admin/static"));
        let max_upload_bytes = lookup("SITEDECK_MAX_UPLOAD_BYTES")
            .map(|value| parse_var("SITEDECK_MAX_UPLOAD_BYTES", &value))
            .transpose()?
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);
        let editor_api_key = lookup("SITEDECK_EDITOR_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .map(SecretString::from);
        let json_logs = lookup("SITEDECK_LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));

        let sentry_dsn = lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty());
        let sentry_environment = lookup("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = lookup("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = lookup("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.0);

        Ok(Self {
            host,
            port,
            storage,
            static_dir,
            max_upload_bytes,
            editor_api_key,
            json_logs,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AdminConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AdminConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3001");
        assert_eq!(
            config.storage,
            StorageConfig::File {
                data_dir: PathBuf::from("data")
            }
        );
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        assert!(config.editor_api_key.is_none());
        assert!(!config.json_logs);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SITEDECK_HOST", "0.0.0.0"),
            ("SITEDECK_PORT", "8080"),
            ("SITEDECK_STORAGE", "Memory"),
            ("SITEDECK_MAX_UPLOAD_BYTES", "1024"),
            ("SITEDECK_EDITOR_API_KEY", "tiny-key-123"),
            ("SITEDECK_LOG_FORMAT", "JSON"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.storage, StorageConfig::Memory);
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(
            config.editor_api_key.as_ref().unwrap().expose_secret(),
            "tiny-key-123"
        );
        assert!(config.json_logs);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("SITEDECK_PORT", "99999")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "SITEDECK_PORT"
        ));
        assert!(load(&[("SITEDECK_STORAGE", "s3")]).is_err());
        assert!(load(&[("SITEDECK_HOST", "localhost")]).is_err());
    }

    #[test]
    fn test_debug_redacts_editor_key() {
        let config = load(&[("SITEDECK_EDITOR_API_KEY", "super_secret_editor_key")]).unwrap();
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_editor_key"));
    }
}
