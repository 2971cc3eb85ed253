//! GenAI-backed provider implementation
//!
//! Uses the `genai` crate for a unified interface across OpenAI, Gemini,
//! Claude, and Ollama. Credentials come from the standard provider
//! environment variables (`OPENAI_API_KEY`, `GOOGLE_API_KEY`,
//! `ANTHROPIC_API_KEY`, `OLLAMA_HOST`), which genai reads itself.

use async_trait::async_trait;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use genai::Client;
use std::time::Duration;
use tracing::{debug, error};

use super::provider::{AiProvider, Provider, ProviderError};

/// LLM provider backed by the `genai` client.
pub struct GenAiProvider {
    client: Client,
    provider: Provider,
    model: String,
    timeout: Duration,
}

impl GenAiProvider {
    /// Creates a provider for the given backend and model.
    pub fn new(provider: Provider, model: String, timeout: Duration) -> Self {
        debug!(
            provider = provider.as_str(),
            model = %model,
            "creating genai provider"
        );
        Self {
            client: Client::default(),
            provider,
            model,
            timeout,
        }
    }
}

#[async_trait]
impl AiProvider for GenAiProvider {
    async fn generate_content(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<String, ProviderError> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_prompt),
        ]);
        let options = ChatOptions::default().with_temperature(temperature as f64);

        let response = match tokio::time::timeout(
            self.timeout,
            self.client.exec_chat(&self.model, request, Some(&options)),
        )
        .await
        {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                error!(provider = self.provider.as_str(), error = %e, "LLM request failed");
                return Err(ProviderError::Api {
                    message: format!("{} request failed: {}", self.provider, e),
                });
            }
            Err(_) => {
                error!(
                    provider = self.provider.as_str(),
                    timeout_secs = self.timeout.as_secs(),
                    "LLM request timed out"
                );
                return Err(ProviderError::Timeout {
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        match response.first_text() {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Err(ProviderError::MalformedResponse {
                message: "empty response".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        self.provider.as_str()
    }

    fn model_info(&self) -> Option<String> {
        Some(self.model.clone())
    }
}

impl std::fmt::Debug for GenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAiProvider")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}
