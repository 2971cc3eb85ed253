//! Mock provider for tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::provider::{AiProvider, ProviderError};

/// Queue-backed provider that replays canned responses in order.
pub struct MockProvider {
    responses: Mutex<VecDeque<Result<String, ProviderError>>>,
    name: String,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            name: "mock".to_string(),
        }
    }

    pub fn with_response(text: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.push_text(text);
        mock
    }

    pub fn with_error(error: ProviderError) -> Self {
        let mock = Self::new();
        mock.push_error(error);
        mock
    }

    pub fn push_text(&self, text: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
    }

    pub fn push_error(&self, error: ProviderError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockProvider {
    async fn generate_content(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
        _temperature: f32,
    ) -> Result<String, ProviderError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ProviderError::Api {
                    message: "mock provider has no queued responses".to_string(),
                })
            })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replays_in_order() {
        let mock = MockProvider::new();
        mock.push_text("first");
        mock.push_text("second");

        assert_eq!(
            mock.generate_content("s", "u", 0.0).await.unwrap(),
            "first"
        );
        assert_eq!(
            mock.generate_content("s", "u", 0.0).await.unwrap(),
            "second"
        );
        assert_eq!(mock.remaining(), 0);
    }

    #[tokio::test]
    async fn test_mock_exhausted_errors() {
        let mock = MockProvider::new();
        assert!(mock.generate_content("s", "u", 0.0).await.is_err());
    }
}
