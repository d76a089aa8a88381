//! Structured per-unit outcomes and the job-level failure report.
//!
//! Every generator returns a [`SectionOutcome`]; the orchestrator folds failed ones into a
//! [`FailureReport`], which renders the `failed_sections` markers persisted with the site.

use crate::generation::settings::SectionKind;
use crate::provider::TokenUsage;
use crate::site::GeneratedSiteData;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Foundation,
    Sections,
    CustomPages,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// The primitive returned an error (after its own retries).
    CallFailed { error: String },
    /// A response arrived but no valid shape could be extracted from it.
    Unparseable { finish_reason: String },
    /// The response parsed but changed content it was told to preserve.
    ContentDrift,
    /// A synthesized default was substituted.
    FallbackApplied,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::CallFailed { error } => write!(f, "call failed: {}", error),
            FailureReason::Unparseable { finish_reason } => {
                write!(f, "unparseable response (finish reason: {})", finish_reason)
            }
            FailureReason::ContentDrift => f.write_str("response altered preserved content"),
            FailureReason::FallbackApplied => f.write_str("fallback content used"),
        }
    }
}

/// Result of one unit of generation work.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionOutcome<T> {
    Generated(T),
    Failed { reason: FailureReason, phase: Phase },
}

impl<T> SectionOutcome<T> {
    pub fn failed(phase: Phase, reason: FailureReason) -> Self {
        SectionOutcome::Failed { reason, phase }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, SectionOutcome::Generated(_))
    }

}

/// Which unit a failure belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "name", rename_all = "snake_case")]
pub enum FailedUnit {
    Section(SectionKind),
    ContactFallback,
    FaqFallback,
    CustomPage(String),
}

impl FailedUnit {
    pub const CONTACT_FALLBACK_MARKER: &'static str = "contact-fallback-used";
    pub const FAQ_FALLBACK_MARKER: &'static str = "faq-fallback-used";

    /// String identifier stored in `metadata.failed_sections`.
    pub fn marker(&self) -> String {
        match self {
            FailedUnit::Section(kind) => kind.as_str().to_string(),
            FailedUnit::ContactFallback => Self::CONTACT_FALLBACK_MARKER.to_string(),
            FailedUnit::FaqFallback => Self::FAQ_FALLBACK_MARKER.to_string(),
            FailedUnit::CustomPage(page_type) => format!("custom-page:{}", page_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationFailure {
    pub unit: FailedUnit,
    pub phase: Phase,
    pub reason: FailureReason,
}

/// Failures in the order they were recorded across phases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureReport {
    failures: Vec<GenerationFailure>,
}

impl FailureReport {
    pub fn record(&mut self, unit: FailedUnit, phase: Phase, reason: FailureReason) {
        self.failures.push(GenerationFailure {
            unit,
            phase,
            reason,
        });
    }

    pub fn markers(&self) -> Vec<String> {
        self.failures.iter().map(|f| f.unit.marker()).collect()
    }

    pub fn into_failures(self) -> Vec<GenerationFailure> {
        self.failures
    }
}

/// Accounting and observability envelope returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteGenerationResult {
    pub data: GeneratedSiteData,
    pub token_usage: TokenUsage,
    pub total_cost_cents: f64,
    pub total_calls: u32,
    pub failed_sections: Vec<String>,
    #[serde(default)]
    pub failures: Vec<GenerationFailure>,
}
