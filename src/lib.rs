//! sitegen: LLM-driven website content generation
//!
//! Turns a short business description (plus optional context scraped from an existing
//! website) into complete, typed site content: identity and branding, the standard
//! sections, and context-driven custom pages. Generation tolerates partial failure and
//! reports token usage, cost and every degraded unit alongside the result.

pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod logging;
pub mod provider;
pub mod site;
pub mod store;
pub mod telemetry;
