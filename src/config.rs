//! Runtime configuration, read once from the environment at start-up.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::domain::{EmbeddingConfig, DEFAULT_LIMIT, DEFAULT_THRESHOLD};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Helper to load an environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load an environment variable or return an error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar(key.to_string())),
    }
}

fn env_parse<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::ParseError {
                key: key.to_string(),
                details: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub embedding: EmbeddingConfig,
    pub qdrant_host: String,
    pub qdrant_port: u16,
    pub qdrant_api_key: Option<String>,
    pub collection_name: String,
    pub similarity_threshold: f32,
    pub default_limit: usize,
    pub request_timeout: Duration,
    pub server_host: String,
    pub server_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            embedding: EmbeddingConfig::default(),
            qdrant_host: "localhost".to_string(),
            qdrant_port: 6334,
            qdrant_api_key: None,
            collection_name: "premed_questions".to_string(),
            similarity_threshold: DEFAULT_THRESHOLD,
            default_limit: DEFAULT_LIMIT,
            request_timeout: Duration::from_secs(30),
            server_host: "0.0.0.0".to_string(),
            server_port: 8000,
        }
    }
}

impl AppConfig {
    /// Reads every setting from the environment. `OPENAI_API_KEY` is only
    /// required when `require_credentials` is set.
    pub fn from_env(require_credentials: bool) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let openai_api_key = if require_credentials {
            Some(env_required("OPENAI_API_KEY")?)
        } else {
            env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty())
        };

        let model = env_or_default("OPENAI_EMBEDDING_MODEL", defaults.embedding.model_name());
        let mut embedding = EmbeddingConfig::for_model(model);
        if let Some(dimensions) = env_parse::<usize>("EMBEDDING_DIMENSIONS")? {
            if dimensions == 0 {
                return Err(ConfigError::ParseError {
                    key: "EMBEDDING_DIMENSIONS".to_string(),
                    details: "must be greater than 0".to_string(),
                });
            }
            embedding = embedding.with_dimensions(dimensions);
        }

        let similarity_threshold =
            env_parse::<f32>("SIMILARITY_THRESHOLD")?.unwrap_or(defaults.similarity_threshold);
        if !(0.0..=1.0).contains(&similarity_threshold) {
            return Err(ConfigError::ParseError {
                key: "SIMILARITY_THRESHOLD".to_string(),
                details: format!("must be between 0 and 1, got {similarity_threshold}"),
            });
        }

        let default_limit =
            env_parse::<usize>("DEFAULT_RESULT_LIMIT")?.unwrap_or(defaults.default_limit);
        if default_limit == 0 {
            return Err(ConfigError::ParseError {
                key: "DEFAULT_RESULT_LIMIT".to_string(),
                details: "must be greater than 0".to_string(),
            });
        }

        let timeout_secs = env_parse::<u64>("REQUEST_TIMEOUT_SECS")?
            .unwrap_or(defaults.request_timeout.as_secs());

        Ok(Self {
            openai_api_key,
            openai_base_url: env_or_default("OPENAI_BASE_URL", &defaults.openai_base_url),
            embedding,
            qdrant_host: env_or_default("QDRANT_HOST", &defaults.qdrant_host),
            qdrant_port: env_parse("QDRANT_PORT")?.unwrap_or(defaults.qdrant_port),
            qdrant_api_key: env::var("QDRANT_API_KEY").ok().filter(|k| !k.is_empty()),
            collection_name: env_or_default("QDRANT_COLLECTION_NAME", &defaults.collection_name),
            similarity_threshold,
            default_limit,
            request_timeout: Duration::from_secs(timeout_secs),
            server_host: env_or_default("SERVER_HOST", &defaults.server_host),
            server_port: env_parse("SERVER_PORT")?.unwrap_or(defaults.server_port),
        })
    }

    /// gRPC endpoint for the Qdrant client. A host that already carries a
    /// scheme is used as given.
    pub fn qdrant_url(&self) -> String {
        if self.qdrant_host.contains("://") {
            format!("{}:{}", self.qdrant_host, self.qdrant_port)
        } else {
            format!("http://{}:{}", self.qdrant_host, self.qdrant_port)
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
