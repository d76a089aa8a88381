//! Site Generation
//!
//! Three-phase pipeline around one LLM call primitive:
//!
//! 1. **Foundation** (blocking): site identity, branding and hero. Failure aborts the job.
//! 2. **Sections** (concurrent, best-effort): about, contact, testimonials, values,
//!    features, services and team, joined with a settle-all join.
//! 3. **Custom pages** (conditional, best-effort): FAQ preserved verbatim from scraped
//!    context, plus up to a capped number of recommended pages generated one at a time.
//!
//! [`SiteGenerator::generate_site_content`] sequences the phases and folds every unit's
//! outcome into a single [`SiteGenerationResult`].

pub mod custom_pages;
pub mod foundation;
pub mod orchestrator;
pub mod outcome;
pub mod parse;
pub mod prompts;
pub mod sections;
pub mod settings;
pub mod usage;

pub use orchestrator::SiteGenerator;
pub use outcome::{
    FailedUnit, FailureReason, FailureReport, GenerationFailure, Phase, SectionOutcome,
    SiteGenerationResult,
};
pub use sections::GeneratedSection;
pub use settings::{CallBudget, GenerationSettings, SectionKind};
pub use usage::{calculate_cost_cents, PricingTable, UsageLedger};
