//! Configuration management for the chat shim.
//!
//! All settings come from environment variables (optionally via a `.env` file
//! loaded in `main`). The backend endpoint is the only required setting.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port)
    #[serde(default)]
    pub server: ServerConfig,

    /// URL of the external backend's generate endpoint
    pub backend_url: String,

    /// Per-call timeout for backend requests in seconds
    #[serde(default = "default_backend_timeout")]
    pub backend_timeout_secs: u64,

    /// Model identifiers advertised by GET /models
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Delay between streamed chunks in milliseconds (0 = no pacing)
    #[serde(default)]
    pub stream_chunk_delay_ms: u64,
}

/// Server-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_backend_timeout() -> u64 {
    30
}

fn default_models() -> Vec<String> {
    vec!["mock-gpt-model".to_string()]
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `BACKEND_URL`: backend generate endpoint
    ///
    /// Optional:
    /// - `HOST` (default: 0.0.0.0)
    /// - `PORT` (default: 8000)
    /// - `BACKEND_TIMEOUT_SECS` (default: 30)
    /// - `MODELS`: comma-separated advertised model ids (default: mock-gpt-model)
    /// - `STREAM_CHUNK_DELAY_MS` (default: 0)
    pub fn from_env() -> Result<Self> {
        let backend_url =
            std::env::var("BACKEND_URL").context("BACKEND_URL environment variable is required")?;

        let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().context("PORT must be a valid port number")?,
            Err(_) => default_port(),
        };

        let backend_timeout_secs = match std::env::var("BACKEND_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("BACKEND_TIMEOUT_SECS must be an integer")?,
            Err(_) => default_backend_timeout(),
        };

        let models = match std::env::var("MODELS") {
            Ok(raw) => {
                let models: Vec<String> = raw
                    .split(',')
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty())
                    .collect();
                if models.is_empty() {
                    default_models()
                } else {
                    models
                }
            }
            Err(_) => default_models(),
        };

        let stream_chunk_delay_ms = match std::env::var("STREAM_CHUNK_DELAY_MS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("STREAM_CHUNK_DELAY_MS must be an integer")?,
            Err(_) => 0,
        };

        Ok(Self {
            server: ServerConfig { host, port },
            backend_url,
            backend_timeout_secs,
            models,
            stream_chunk_delay_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8000);
    }

    #[test]
    fn test_default_models_non_empty() {
        assert!(!default_models().is_empty());
    }

    #[test]
    fn test_config_deserialization_with_defaults() {
        let json = r#"{"backend_url": "http://localhost:9000/generate"}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.backend_url, "http://localhost:9000/generate");
        assert_eq!(config.backend_timeout_secs, 30);
        assert_eq!(config.models, vec!["mock-gpt-model".to_string()]);
        assert_eq!(config.stream_chunk_delay_ms, 0);
    }
}
