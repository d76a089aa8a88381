//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied. Later sources override
/// these key by key; tables merge rather than replace.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("provider.provider_type", "openrouter")?
        .set_default("provider.model", "meta-llama/llama-3.3-70b-instruct:free")?
        .set_default("storage.store_path", ".sitegen/store")
}
