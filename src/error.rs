//! Error types for the site generation pipeline.

use thiserror::Error;

/// Content-store errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Site not found: {0}")]
    SiteNotFound(String),

    #[error("Invalid site id: {0}")]
    InvalidSiteId(String),

    #[error("Failed to encode stored site: {0}")]
    Encode(String),

    #[error("Failed to decode stored site: {0}")]
    Decode(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Pipeline and provider errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Provider request timed out after {0} ms")]
    ProviderTimeout(u64),

    #[error("Provider authentication failed: {0}")]
    ProviderAuthFailed(String),

    #[error("Provider rate limit exceeded: {0}")]
    ProviderRateLimit(String),

    #[error("Provider model not found: {0}")]
    ProviderModelNotFound(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Foundation generation failed: {0}")]
    FoundationFailed(String),

    #[error("Required section '{0}' could not be generated")]
    RequiredSectionMissing(String),

    #[error("Site generation failed: {0}")]
    SiteGenerationFailed(Box<ApiError>),
}

impl ApiError {
    /// Whether a provider call that failed with this error may succeed on a later attempt.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ApiError::ProviderRequestFailed(_)
                | ApiError::ProviderTimeout(_)
                | ApiError::ProviderRateLimit(_)
        )
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
