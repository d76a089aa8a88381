//! Configuration System
//!
//! Layered configuration for provider access, generation tuning, pricing, storage and
//! logging. Sources merge in order: built-in defaults, the user's global file, the
//! workspace files, then `SITEGEN__*` environment variables.

use crate::error::ApiError;
use crate::generation::{GenerationSettings, PricingTable};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

pub use crate::provider::{ProviderConfig, ProviderType};

mod facade;
mod merge;
mod sources;
mod storage;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use storage::StorageConfig;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SitegenConfig {
    /// Model provider used for every generation call
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Call budgets, retries and custom page cap
    #[serde(default)]
    pub generation: GenerationSettings,

    /// Token prices used for cost reporting
    #[serde(default)]
    pub pricing: PricingTable,

    /// Content store location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Provider(String),
    Generation(String),
    Pricing(String),
    Storage(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Provider(msg) => write!(f, "Provider: {}", msg),
            ValidationError::Generation(msg) => write!(f, "Generation: {}", msg),
            ValidationError::Pricing(msg) => write!(f, "Pricing: {}", msg),
            ValidationError::Storage(msg) => write!(f, "Storage: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
const LOG_FORMATS: &[&str] = &["text", "json"];
const LOG_OUTPUTS: &[&str] = &["stdout", "stderr", "file", "file+stderr"];

fn validate_logging(logging: &LoggingConfig) -> Result<(), String> {
    if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
        return Err(format!("Unknown log level '{}'", logging.level));
    }
    if !LOG_FORMATS.contains(&logging.format.to_lowercase().as_str()) {
        return Err(format!("Unknown log format '{}'", logging.format));
    }
    if !LOG_OUTPUTS.contains(&logging.output.to_lowercase().as_str()) {
        return Err(format!("Unknown log output '{}'", logging.output));
    }
    Ok(())
}

impl SitegenConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.provider.validate() {
            errors.push(ValidationError::Provider(e));
        }
        if let Err(e) = self.generation.validate() {
            errors.push(ValidationError::Generation(e));
        }
        if let Err(e) = self.pricing.validate() {
            errors.push(ValidationError::Pricing(e));
        }
        if let Err(e) = self.storage.validate() {
            errors.push(ValidationError::Storage(e));
        }
        if let Err(e) = validate_logging(&self.logging) {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold every problem into a single `ApiError::ConfigError`.
    pub fn validated(self) -> Result<Self, ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(self)
    }
}
