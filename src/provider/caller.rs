//! The single LLM call primitive used by every generator.
//!
//! One prompt + system prompt in, content + usage + finish reason out. Each attempt is
//! bounded by the caller-supplied timeout; transient provider failures are retried up to
//! `retries` times. Truncation is reported through [`FinishReason::Length`], never as an error.

use crate::error::ApiError;
use crate::provider::{ChatMessage, CompletionOptions, ModelProviderClient, TokenUsage};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Per-call knobs for [`LlmCaller::generate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LlmCallOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub retries: u32,
}

/// Why the model stopped producing tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    /// Output hit the token ceiling and is probably cut off mid-document.
    Length,
    ContentFilter,
    Other(String),
    Unknown,
}

impl FinishReason {
    pub fn from_provider(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => FinishReason::Unknown,
            Some("stop") | Some("end_turn") | Some("eos") => FinishReason::Stop,
            Some("length") | Some("max_tokens") => FinishReason::Length,
            Some("content_filter") => FinishReason::ContentFilter,
            Some(other) => FinishReason::Other(other.to_string()),
        }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, FinishReason::Length)
    }

    pub fn as_str(&self) -> &str {
        match self {
            FinishReason::Stop => "stop",
            FinishReason::Length => "length",
            FinishReason::ContentFilter => "content_filter",
            FinishReason::Other(reason) => reason,
            FinishReason::Unknown => "unknown",
        }
    }
}

/// Result of one successful primitive invocation.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub usage: Option<TokenUsage>,
    pub finish_reason: FinishReason,
    pub model: String,
}

/// Wraps a provider client with timeout and delegated retry handling.
#[derive(Clone)]
pub struct LlmCaller {
    client: Arc<dyn ModelProviderClient>,
    retry_backoff: Duration,
}

impl LlmCaller {
    const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(1000);

    pub fn new(client: Arc<dyn ModelProviderClient>) -> Self {
        Self {
            client,
            retry_backoff: Self::DEFAULT_RETRY_BACKOFF,
        }
    }

    /// Base delay between retries; attempt `n` waits `n * backoff`.
    pub fn with_retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    pub fn provider_name(&self) -> &str {
        self.client.provider_name()
    }

    pub async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        options: &LlmCallOptions,
    ) -> Result<LlmResponse, ApiError> {
        let mut attempt = 0u32;
        loop {
            let messages = vec![ChatMessage::system(system_prompt), ChatMessage::user(prompt)];
            let completion_options = CompletionOptions {
                temperature: Some(options.temperature),
                max_tokens: Some(options.max_tokens),
                top_p: None,
                stop: None,
            };

            let outcome = match tokio::time::timeout(
                options.timeout,
                self.client.complete(messages, completion_options),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(ApiError::ProviderTimeout(options.timeout.as_millis() as u64)),
            };

            match outcome {
                Ok(response) => {
                    let finish_reason = FinishReason::from_provider(response.finish_reason.as_deref());
                    debug!(
                        provider = self.client.provider_name(),
                        model = %response.model,
                        attempt,
                        max_tokens = options.max_tokens,
                        finish_reason = finish_reason.as_str(),
                        "LLM call completed"
                    );
                    return Ok(LlmResponse {
                        content: response.content,
                        usage: response.usage,
                        finish_reason,
                        model: response.model,
                    });
                }
                Err(err) if err.is_transient() && attempt < options.retries => {
                    attempt += 1;
                    warn!(
                        provider = self.client.provider_name(),
                        attempt,
                        retries = options.retries,
                        error = %err,
                        "Transient provider failure, retrying"
                    );
                    tokio::time::sleep(self.retry_backoff * attempt).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
