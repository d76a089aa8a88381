//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, ConfigCommands};
pub use presentation::{
    format_config_text, format_config_validation_text, format_generation_result_json,
    format_generation_result_text, format_site_json, format_site_list_json,
    format_site_list_text, format_site_text,
};
pub use route::RunContext;
