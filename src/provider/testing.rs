//! Scripted provider for unit tests.

use crate::error::ApiError;
use crate::provider::{
    ChatMessage, CompletionOptions, CompletionResponse, MessageRole, ModelProviderClient,
    TokenUsage,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

/// What the mock saw for one `complete` call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Replays queued outcomes in order and records every request.
pub struct MockProvider {
    outcomes: Mutex<VecDeque<Result<CompletionResponse, ApiError>>>,
    calls: Mutex<Vec<RecordedCall>>,
    delay: Option<Duration>,
}

impl MockProvider {
    pub fn new(outcomes: Vec<Result<CompletionResponse, ApiError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn reply(content: &str, finish_reason: &str) -> Result<CompletionResponse, ApiError> {
        Ok(CompletionResponse {
            content: content.to_string(),
            model: "mock-model".to_string(),
            usage: Some(TokenUsage::new(10, 20)),
            finish_reason: Some(finish_reason.to_string()),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ModelProviderClient for MockProvider {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError> {
        let prompt_for = |role: MessageRole| {
            messages
                .iter()
                .find(|m| m.role == role)
                .map(|m| m.content.clone())
                .unwrap_or_default()
        };
        self.calls.lock().push(RecordedCall {
            system_prompt: prompt_for(MessageRole::System),
            user_prompt: prompt_for(MessageRole::User),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcomes
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::ProviderError("mock exhausted".to_string())))
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
