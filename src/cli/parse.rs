//! CLI parse: clap types for sitegen. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sitegen - LLM-assisted website content generation
#[derive(Parser)]
#[command(name = "sitegen")]
#[command(about = "Generate complete website content for a business with an LLM")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate site content for a business
    Generate {
        /// Business name
        #[arg(long)]
        name: String,
        /// What the site should be about
        #[arg(long)]
        prompt: String,
        #[arg(long)]
        industry: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// JSON file with scraped context from an existing website
        #[arg(long)]
        scraped: Option<PathBuf>,
        /// Store under this id instead of the slugified site name
        #[arg(long)]
        site_id: Option<String>,
        /// Do not write the result to the content store
        #[arg(long)]
        no_store: bool,
        /// Include progress events in the output
        #[arg(long)]
        events: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show a stored site
    Show {
        site_id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List stored sites
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Delete a stored site
    Delete { site_id: String },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration (API keys redacted)
    Show {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Validate the effective configuration
    Validate,
}
