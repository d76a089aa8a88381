//! CLI presentation: text and json formatters per command family.

mod config;
mod generate;
mod shared;
mod site;

pub use config::{format_config_text, format_config_validation_text};
pub use generate::{format_generation_result_json, format_generation_result_text};
pub use site::{format_site_json, format_site_list_json, format_site_list_text, format_site_text};
