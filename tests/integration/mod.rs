//! Integration tests for the site generation pipeline

mod cli_commands;
mod config_integration;
mod content_store;
mod site_generation;
