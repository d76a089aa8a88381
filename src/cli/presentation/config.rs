//! Config command presentation.

use crate::cli::presentation::shared::to_pretty_json;
use crate::config::{SitegenConfig, ValidationError};
use owo_colors::OwoColorize;

const REDACTED: &str = "********";

fn redacted(config: &SitegenConfig) -> SitegenConfig {
    let mut config = config.clone();
    if config.provider.api_key.is_some() {
        config.provider.api_key = Some(REDACTED.to_string());
    }
    config
}

pub fn format_config_text(config: &SitegenConfig, format: &str) -> String {
    let config = redacted(config);
    if format == "json" {
        return to_pretty_json(&config);
    }
    toml::to_string_pretty(&config).unwrap_or_else(|e| format!("Failed to render config: {}", e))
}

pub fn format_config_validation_text(result: &Result<(), Vec<ValidationError>>) -> String {
    match result {
        Ok(()) => format!("{}", "Configuration is valid.".green()),
        Err(errors) => {
            let mut out = format!(
                "{}\n",
                format!("Configuration has {} problem(s):", errors.len()).red()
            );
            for error in errors {
                out.push_str(&format!("  - {}\n", error));
            }
            out
        }
    }
}
