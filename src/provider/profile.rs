//! Provider profile: which endpoint and model the generator talks to.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// Supported provider kinds. All speak the OpenAI chat-completions dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[serde(alias = "open_router")]
    OpenRouter,
    OpenAI,
    Ollama,
    #[serde(rename = "local")]
    LocalCustom,
}

impl ProviderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::OpenRouter => "openrouter",
            ProviderType::OpenAI => "openai",
            ProviderType::Ollama => "ollama",
            ProviderType::LocalCustom => "local",
        }
    }

    pub fn default_endpoint(&self) -> Option<&'static str> {
        match self {
            ProviderType::OpenRouter => Some("https://openrouter.ai/api/v1"),
            ProviderType::OpenAI => Some("https://api.openai.com/v1"),
            ProviderType::Ollama => Some("http://localhost:11434/v1"),
            ProviderType::LocalCustom => None,
        }
    }

    pub fn api_key_env_var(&self) -> Option<&'static str> {
        match self {
            ProviderType::OpenRouter => Some("OPENROUTER_API_KEY"),
            ProviderType::OpenAI => Some("OPENAI_API_KEY"),
            ProviderType::Ollama | ProviderType::LocalCustom => None,
        }
    }

    pub fn requires_api_key(&self) -> bool {
        self.api_key_env_var().is_some()
    }
}

/// Provider configuration (`[provider]` table)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_provider_type")]
    pub provider_type: ProviderType,

    #[serde(default = "default_model")]
    pub model: String,

    /// Falls back to the provider type's API key environment variable
    #[serde(default)]
    pub api_key: Option<String>,

    /// Overrides the provider type's default base URL
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Sent as `HTTP-Referer` to OpenRouter
    #[serde(default)]
    pub site_url: Option<String>,

    /// Sent as `X-Title` to OpenRouter
    #[serde(default)]
    pub app_name: Option<String>,
}

fn default_provider_type() -> ProviderType {
    ProviderType::OpenRouter
}

fn default_model() -> String {
    "meta-llama/llama-3.3-70b-instruct:free".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            model: default_model(),
            api_key: None,
            endpoint: None,
            site_url: None,
            app_name: Some("Brands & Blooms".to_string()),
        }
    }
}

impl ProviderConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model name cannot be empty".to_string());
        }
        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(format!(
                    "Endpoint must be an http(s) URL, got '{}'",
                    endpoint
                ));
            }
        }
        if self.provider_type == ProviderType::LocalCustom && self.endpoint.is_none() {
            return Err("Local providers require an endpoint".to_string());
        }
        Ok(())
    }

    pub fn resolved_endpoint(&self) -> Result<String, ApiError> {
        self.endpoint
            .clone()
            .or_else(|| self.provider_type.default_endpoint().map(str::to_string))
            .ok_or_else(|| {
                ApiError::ProviderNotConfigured(format!(
                    "No endpoint configured for {} provider",
                    self.provider_type.as_str()
                ))
            })
    }

    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                self.provider_type
                    .api_key_env_var()
                    .and_then(|var| std::env::var(var).ok())
                    .filter(|key| !key.trim().is_empty())
            })
    }
}
