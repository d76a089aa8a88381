//! Per-unit call budgets and job-level tuning.

use crate::provider::LlmCallOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Temperature, token ceiling and timeout for one kind of call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CallBudget {
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl CallBudget {
    pub const fn new(temperature: f32, max_tokens: u32, timeout_secs: u64) -> Self {
        Self {
            temperature,
            max_tokens,
            timeout_secs,
        }
    }

    pub fn to_options(&self, retries: u32) -> LlmCallOptions {
        LlmCallOptions {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            timeout: Duration::from_secs(self.timeout_secs),
            retries,
        }
    }

    fn validate(&self, label: &str) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(format!(
                "{} temperature must be within 0.0..=1.0, got {}",
                label, self.temperature
            ));
        }
        if self.max_tokens == 0 {
            return Err(format!("{} max_tokens must be positive", label));
        }
        if self.timeout_secs == 0 {
            return Err(format!("{} timeout_secs must be positive", label));
        }
        Ok(())
    }
}

/// The seven Phase 2 sections, in the order their outcomes are folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    About,
    Contact,
    Testimonials,
    Values,
    Features,
    Services,
    Team,
}

impl SectionKind {
    pub const ALL: [SectionKind; 7] = [
        SectionKind::About,
        SectionKind::Contact,
        SectionKind::Testimonials,
        SectionKind::Values,
        SectionKind::Features,
        SectionKind::Services,
        SectionKind::Team,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::About => "about",
            SectionKind::Contact => "contact",
            SectionKind::Testimonials => "testimonials",
            SectionKind::Values => "values",
            SectionKind::Features => "features",
            SectionKind::Services => "services",
            SectionKind::Team => "team",
        }
    }

    /// Contact runs cold for factual accuracy; testimonials run hot for variety.
    pub fn budget(&self) -> CallBudget {
        match self {
            SectionKind::About => CallBudget::new(0.7, 1500, 30),
            SectionKind::Contact => CallBudget::new(0.3, 800, 30),
            SectionKind::Testimonials => CallBudget::new(0.9, 1500, 30),
            SectionKind::Values => CallBudget::new(0.7, 1200, 30),
            SectionKind::Features => CallBudget::new(0.7, 1500, 30),
            SectionKind::Services => CallBudget::new(0.7, 1500, 30),
            SectionKind::Team => CallBudget::new(0.7, 1200, 30),
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job-level settings (`[generation]` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Retries delegated to the call primitive for transient provider errors
    #[serde(default = "default_call_retries")]
    pub call_retries: u32,

    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    #[serde(default = "default_foundation_budget")]
    pub foundation: CallBudget,

    /// Ceiling for the single re-issue after a truncated foundation response
    #[serde(default = "default_foundation_retry_max_tokens")]
    pub foundation_retry_max_tokens: u32,

    #[serde(default = "default_faq_budget")]
    pub faq: CallBudget,

    #[serde(default = "default_custom_page_budget")]
    pub custom_page: CallBudget,

    /// Upper bound on recommended pages generated per job (FAQ excluded)
    #[serde(default = "default_max_custom_pages")]
    pub max_custom_pages: usize,
}

fn default_call_retries() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_foundation_budget() -> CallBudget {
    CallBudget::new(0.8, 3000, 45)
}

fn default_foundation_retry_max_tokens() -> u32 {
    4000
}

fn default_faq_budget() -> CallBudget {
    CallBudget::new(0.3, 2500, 45)
}

fn default_custom_page_budget() -> CallBudget {
    CallBudget::new(0.7, 2000, 45)
}

fn default_max_custom_pages() -> usize {
    3
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            call_retries: default_call_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            foundation: default_foundation_budget(),
            foundation_retry_max_tokens: default_foundation_retry_max_tokens(),
            faq: default_faq_budget(),
            custom_page: default_custom_page_budget(),
            max_custom_pages: default_max_custom_pages(),
        }
    }
}

impl GenerationSettings {
    pub fn validate(&self) -> Result<(), String> {
        self.foundation.validate("foundation")?;
        self.faq.validate("faq")?;
        self.custom_page.validate("custom_page")?;
        if self.foundation_retry_max_tokens <= self.foundation.max_tokens {
            return Err(format!(
                "foundation_retry_max_tokens ({}) must exceed foundation.max_tokens ({})",
                self.foundation_retry_max_tokens, self.foundation.max_tokens
            ));
        }
        Ok(())
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn foundation_options(&self) -> LlmCallOptions {
        self.foundation.to_options(self.call_retries)
    }

    /// Same as the first foundation call but with the raised ceiling.
    pub fn foundation_retry_options(&self) -> LlmCallOptions {
        LlmCallOptions {
            max_tokens: self.foundation_retry_max_tokens,
            ..self.foundation_options()
        }
    }

    pub fn section_options(&self, kind: SectionKind) -> LlmCallOptions {
        kind.budget().to_options(self.call_retries)
    }

    pub fn faq_options(&self) -> LlmCallOptions {
        self.faq.to_options(self.call_retries)
    }

    pub fn custom_page_options(&self) -> LlmCallOptions {
        self.custom_page.to_options(self.call_retries)
    }
}
