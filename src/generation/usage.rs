//! Token and cost accounting.

use crate::provider::TokenUsage;
use serde::{Deserialize, Serialize};

/// Calls and tokens attributed to one unit of work, or to a whole job once merged.
/// Only ever grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLedger {
    pub calls: u32,
    pub tokens: TokenUsage,
}

impl UsageLedger {
    /// Record one primitive invocation that returned a response.
    pub fn record_call(&mut self, usage: Option<&TokenUsage>) {
        self.calls += 1;
        if let Some(usage) = usage {
            self.tokens.add(usage);
        }
    }

    pub fn merge(&mut self, other: &UsageLedger) {
        self.calls += other.calls;
        self.tokens.add(&other.tokens);
    }
}

/// Per-million-token prices in US cents. The default is the zero-cost free tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingTable {
    #[serde(default)]
    pub prompt_cents_per_million: f64,
    #[serde(default)]
    pub completion_cents_per_million: f64,
}

impl PricingTable {
    pub fn is_free(&self) -> bool {
        self.prompt_cents_per_million == 0.0 && self.completion_cents_per_million == 0.0
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.prompt_cents_per_million < 0.0 || self.completion_cents_per_million < 0.0 {
            return Err("Token prices cannot be negative".to_string());
        }
        Ok(())
    }
}

/// Cost of `usage` under `pricing`, in cents.
pub fn calculate_cost_cents(usage: &TokenUsage, pricing: &PricingTable) -> f64 {
    let prompt = f64::from(usage.prompt_tokens) * pricing.prompt_cents_per_million;
    let completion = f64::from(usage.completion_tokens) * pricing.completion_cents_per_million;
    (prompt + completion) / 1_000_000.0
}
