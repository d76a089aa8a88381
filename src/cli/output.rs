//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output, with a hint where the fix is
/// usually the same.
pub fn map_error(e: &ApiError) -> String {
    let hint = match e {
        ApiError::ProviderAuthFailed(_) | ApiError::ProviderNotConfigured(_) => Some(
            "Check the provider API key (OPENROUTER_API_KEY, OPENAI_API_KEY or provider.api_key).",
        ),
        ApiError::ProviderModelNotFound(_) => {
            Some("Check provider.model in your configuration.")
        }
        ApiError::ProviderRateLimit(_) => Some("The provider is rate limiting; try again shortly."),
        ApiError::ConfigError(_) => Some("Run 'sitegen config validate' for details."),
        _ => None,
    };
    match hint {
        Some(hint) => format!("{}\n{}", e, hint),
        None => e.to_string(),
    }
}
