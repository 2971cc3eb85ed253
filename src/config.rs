//! Configuration loaded from environment variables
//!
//! # Environment Variables
//!
//! - `DOCKERLENS_PROVIDER`: LLM provider (openai|gemini|claude|ollama) - default: "gemini"
//! - `DOCKERLENS_MODEL`: model name - default: the provider's default model
//! - `DOCKERLENS_REQUEST_TIMEOUT`: LLM timeout in seconds - default: "30"
//! - `DOCKERLENS_LOG_LEVEL`: logging level - default: "info"
//!
//! Provider credentials are read directly by the genai library:
//! `OPENAI_API_KEY`, `GOOGLE_API_KEY`, `ANTHROPIC_API_KEY`, `OLLAMA_HOST`.
//!
//! The configuration is built once in `main` and passed explicitly into the
//! AI paths; nothing below the CLI reads the environment.

use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::ai::genai::GenAiProvider;
use crate::ai::provider::Provider;

const DEFAULT_PROVIDER: Provider = Provider::Gemini;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid provider: {0}. Valid options: openai, gemini, claude, ollama")]
    InvalidProvider(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Runtime configuration for dockerlens.
#[derive(Debug, Clone)]
pub struct DockerlensConfig {
    /// LLM provider backing the AI paths
    pub provider: Provider,

    /// Model name (provider-specific)
    pub model: String,

    /// LLM request timeout in seconds
    pub request_timeout_secs: u64,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for DockerlensConfig {
    /// Loads configuration from `DOCKERLENS_*` environment variables with
    /// defaults for anything unset. An unparsable provider name falls back
    /// to the default rather than failing here; `validate` is the place
    /// for hard errors.
    fn default() -> Self {
        let provider = env::var("DOCKERLENS_PROVIDER")
            .ok()
            .and_then(|s| s.parse::<Provider>().ok())
            .unwrap_or(DEFAULT_PROVIDER);

        let model = env::var("DOCKERLENS_MODEL")
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| provider.default_model().to_string());

        let request_timeout_secs = env::var("DOCKERLENS_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let log_level = env::var("DOCKERLENS_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            provider,
            model,
            request_timeout_secs,
            log_level,
        }
    }
}

impl DockerlensConfig {
    /// Checks value ranges. Credential validation happens inside genai when
    /// the first request is made.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    other
                )))
            }
        }

        Ok(())
    }

    /// Builds the configured LLM provider.
    pub fn create_provider(&self) -> Arc<GenAiProvider> {
        Arc::new(GenAiProvider::new(
            self.provider,
            self.model.clone(),
            Duration::from_secs(self.request_timeout_secs),
        ))
    }
}

impl fmt::Display for DockerlensConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dockerlens Configuration:")?;
        writeln!(f, "  Provider: {}", self.provider)?;
        writeln!(f, "  Model: {}", self.model)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
