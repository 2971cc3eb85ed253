//! LLM provider abstraction
//!
//! All AI-assisted paths in the crate go through the [`AiProvider`] trait:
//! a single blocking round-trip of `(system prompt, user prompt,
//! temperature) -> text`. Callers are expected to recover locally from any
//! [`ProviderError`] by falling back to heuristics or static templates.

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from an LLM provider round-trip.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The provider API rejected or failed the request
    #[error("provider request failed: {message}")]
    Api { message: String },

    /// The request timed out
    #[error("provider request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Missing or invalid provider configuration (API key, model)
    #[error("provider configuration error: {message}")]
    Configuration { message: String },

    /// The response could not be used (empty or malformed)
    #[error("malformed provider response: {message}")]
    MalformedResponse { message: String },
}

/// Supported LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Gemini,
    Claude,
    Ollama,
}

impl Provider {
    /// Lowercase identifier used in configuration and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
            Provider::Claude => "claude",
            Provider::Ollama => "ollama",
        }
    }

    /// Default model when none is configured.
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-4.1-mini",
            Provider::Gemini => "gemini-2.0-flash",
            Provider::Claude => "claude-sonnet-4-5",
            Provider::Ollama => "qwen2.5-coder:7b",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "gemini" => Ok(Provider::Gemini),
            "claude" | "anthropic" => Ok(Provider::Claude),
            "ollama" => Ok(Provider::Ollama),
            other => Err(ProviderError::Configuration {
                message: format!(
                    "unsupported provider: {}. Valid options: openai, gemini, claude, ollama",
                    other
                ),
            }),
        }
    }
}

/// A text-generation collaborator.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Generates text for the given prompts. One round-trip, no retries.
    async fn generate_content(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<String, ProviderError>;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Model identifier, when known.
    fn model_info(&self) -> Option<String> {
        None
    }
}

/// Strips markdown code fences an LLM may wrap around its output.
pub fn strip_markdown_fences(response: &str) -> String {
    let mut text = response.trim();
    for prefix in ["```dockerfile", "```json", "```"] {
        if let Some(stripped) = text.strip_prefix(prefix) {
            text = stripped;
            break;
        }
    }
    text = text.strip_suffix("```").unwrap_or(text);
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!("openai".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert_eq!("Gemini".parse::<Provider>().unwrap(), Provider::Gemini);
        assert_eq!("anthropic".parse::<Provider>().unwrap(), Provider::Claude);
        assert!("watson".parse::<Provider>().is_err());
    }

    #[test]
    fn test_default_models() {
        assert_eq!(Provider::OpenAi.default_model(), "gpt-4.1-mini");
        assert_eq!(Provider::Ollama.default_model(), "qwen2.5-coder:7b");
    }

    #[test]
    fn test_strip_markdown_fences() {
        assert_eq!(
            strip_markdown_fences("```dockerfile\nFROM alpine\n```"),
            "FROM alpine"
        );
        assert_eq!(
            strip_markdown_fences("```json\n{\"a\":1}\n```"),
            "{\"a\":1}"
        );
        assert_eq!(strip_markdown_fences("FROM alpine"), "FROM alpine");
        assert_eq!(strip_markdown_fences("  ```\ntext\n```  "), "text");
    }

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::Timeout { seconds: 30 };
        assert!(err.to_string().contains("30"));
    }
}
