//! Job orchestration: sequences the three phases and assembles the result.

use crate::config::SitegenConfig;
use crate::error::ApiError;
use crate::generation::custom_pages::{generate_custom_pages, should_generate_custom_pages};
use crate::generation::foundation::generate_foundation;
use crate::generation::outcome::{
    FailedUnit, FailureReason, FailureReport, Phase, SectionOutcome, SiteGenerationResult,
};
use crate::generation::sections::{generate_all_sections, GeneratedSection};
use crate::generation::settings::GenerationSettings;
use crate::generation::usage::{calculate_cost_cents, PricingTable, UsageLedger};
use crate::provider::{LlmCaller, ProviderFactory};
use crate::site::{
    AboutSection, BusinessInfo, ContactSection, CustomPageSection, FeaturesSection,
    GeneratedSiteData, GenerationMetadata, ScrapedWebsiteContext, ServicesSection, TeamSection,
    TestimonialsSection, ValuesSection,
};
use crate::telemetry::{
    CustomPageEventData, GenerationCompletedData, GenerationFailedData, GenerationStartedData,
    PhaseStartedData, ProgressRuntime, ProgressSink, SectionEventData,
};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Generates complete site content for one business per call. Holds no per-job state;
/// every call starts with fresh accumulators.
pub struct SiteGenerator {
    caller: LlmCaller,
    settings: GenerationSettings,
    pricing: PricingTable,
    progress: Option<Arc<dyn ProgressSink>>,
}

impl SiteGenerator {
    pub fn new(caller: LlmCaller, settings: GenerationSettings) -> Self {
        let caller = caller.with_retry_backoff(settings.retry_backoff());
        Self {
            caller,
            settings,
            pricing: PricingTable::default(),
            progress: None,
        }
    }

    /// Build the provider client, settings and pricing from loaded configuration.
    pub fn from_config(config: &SitegenConfig) -> Result<Self, ApiError> {
        config.provider.validate().map_err(ApiError::ConfigError)?;
        config.generation.validate().map_err(ApiError::ConfigError)?;
        let client = ProviderFactory::create_client(&config.provider)?;
        let caller = LlmCaller::new(Arc::from(client));
        Ok(Self::new(caller, config.generation.clone()).with_pricing(config.pricing))
    }

    pub fn with_pricing(mut self, pricing: PricingTable) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_progress(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.progress = Some(sink);
        self
    }

    /// Run all three phases. A blank name or prompt is rejected before any call; after
    /// that only a foundation failure or a missing About section is returned as an
    /// error, and everything else degrades into `failed_sections`.
    pub async fn generate_site_content(
        &self,
        info: &BusinessInfo,
        scraped: Option<&ScrapedWebsiteContext>,
    ) -> Result<SiteGenerationResult, ApiError> {
        let progress = ProgressRuntime::new(self.progress.clone());
        progress.emit_event_best_effort(
            "generation_started",
            &GenerationStartedData {
                business_name: info.name.clone(),
                has_scraped_context: scraped.is_some(),
                model: self.caller.model_name().to_string(),
            },
        );

        match self.run(info, scraped, &progress).await {
            Ok(result) => Ok(result),
            Err(err) => {
                let err = match err {
                    ApiError::SiteGenerationFailed(_) => err,
                    other => ApiError::SiteGenerationFailed(Box::new(other)),
                };
                error!(business = %info.name, error = %err, "Site generation failed");
                progress.emit_event_best_effort(
                    "generation_failed",
                    &GenerationFailedData {
                        error: err.to_string(),
                    },
                );
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        info: &BusinessInfo,
        scraped: Option<&ScrapedWebsiteContext>,
        progress: &ProgressRuntime,
    ) -> Result<SiteGenerationResult, ApiError> {
        info.validate().map_err(ApiError::InvalidInput)?;
        let started = Instant::now();
        let mut usage = UsageLedger::default();
        let mut report = FailureReport::default();

        emit_phase(progress, Phase::Foundation);
        let foundation = generate_foundation(&self.caller, &self.settings, info, scraped).await?;
        usage.merge(&foundation.usage);
        let foundation = foundation.foundation;

        emit_phase(progress, Phase::Sections);
        let runs =
            generate_all_sections(&self.caller, &self.settings, info, &foundation, scraped).await;
        let mut slots = SectionSlots::default();
        for run in runs {
            usage.merge(&run.usage);
            match run.outcome {
                SectionOutcome::Generated(section) => {
                    progress.emit_event_best_effort(
                        "section_completed",
                        &SectionEventData {
                            section: run.kind.as_str().to_string(),
                            error: None,
                        },
                    );
                    slots.fill(section);
                }
                SectionOutcome::Failed { reason, phase } => {
                    progress.emit_event_best_effort(
                        "section_failed",
                        &SectionEventData {
                            section: run.kind.as_str().to_string(),
                            error: Some(reason.to_string()),
                        },
                    );
                    report.record(FailedUnit::Section(run.kind), phase, reason);
                }
            }
        }

        let about = slots
            .about
            .take()
            .ok_or_else(|| ApiError::RequiredSectionMissing("about".to_string()))?;
        let contact = match slots.contact.take() {
            Some(contact) => contact,
            None => {
                warn!(business = %info.name, "Contact section missing, using fallback");
                report.record(
                    FailedUnit::ContactFallback,
                    Phase::Sections,
                    FailureReason::FallbackApplied,
                );
                ContactSection::fallback()
            }
        };

        let mut custom_pages: Vec<CustomPageSection> = Vec::new();
        if let Some(scraped) = scraped.filter(|s| should_generate_custom_pages(Some(s))) {
            emit_phase(progress, Phase::CustomPages);
            let run =
                generate_custom_pages(&self.caller, &self.settings, info, &foundation, scraped)
                    .await;
            if let Some(faq) = run.faq {
                usage.merge(&faq.usage);
                progress.emit_event_best_effort(
                    "custom_page_completed",
                    &CustomPageEventData {
                        page_type: faq.page.page_type.clone(),
                        fallback: faq.fallback.is_some(),
                        error: faq.fallback.as_ref().map(ToString::to_string),
                    },
                );
                if let Some(reason) = faq.fallback {
                    report.record(FailedUnit::FaqFallback, Phase::CustomPages, reason);
                }
                custom_pages.push(faq.page);
            }
            for page in run.pages {
                usage.merge(&page.usage);
                match page.outcome {
                    SectionOutcome::Generated(section) => {
                        progress.emit_event_best_effort(
                            "custom_page_completed",
                            &CustomPageEventData {
                                page_type: page.page_type.clone(),
                                fallback: false,
                                error: None,
                            },
                        );
                        custom_pages.push(section);
                    }
                    SectionOutcome::Failed { reason, phase } => {
                        progress.emit_event_best_effort(
                            "custom_page_failed",
                            &CustomPageEventData {
                                page_type: page.page_type.clone(),
                                fallback: false,
                                error: Some(reason.to_string()),
                            },
                        );
                        report.record(FailedUnit::CustomPage(page.page_type), phase, reason);
                    }
                }
            }
        }

        let failed_sections = report.markers();
        let duration_ms = started.elapsed().as_millis() as u64;
        let metadata = GenerationMetadata {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            duration_ms,
            failed_sections: failed_sections.clone(),
            model: Some(self.caller.model_name().to_string()),
        };
        let mut data = GeneratedSiteData::from_foundation(foundation, about, contact, metadata);
        data.testimonials = slots.testimonials;
        data.values = slots.values;
        data.features = slots.features;
        data.services = slots.services;
        data.team = slots.team;
        data.custom_pages = if custom_pages.is_empty() {
            None
        } else {
            Some(custom_pages)
        };

        let total_cost_cents = calculate_cost_cents(&usage.tokens, &self.pricing);
        info!(
            business = %info.name,
            duration_ms,
            total_calls = usage.calls,
            total_tokens = usage.tokens.total_tokens,
            failed = failed_sections.len(),
            "Site generation completed"
        );
        progress.emit_event_best_effort(
            "generation_completed",
            &GenerationCompletedData {
                duration_ms,
                total_calls: usage.calls,
                total_tokens: usage.tokens.total_tokens,
                failed_sections: failed_sections.clone(),
            },
        );

        Ok(SiteGenerationResult {
            data,
            token_usage: usage.tokens,
            total_cost_cents,
            total_calls: usage.calls,
            failed_sections,
            failures: report.into_failures(),
        })
    }
}

fn emit_phase(progress: &ProgressRuntime, phase: Phase) {
    let name = match phase {
        Phase::Foundation => "foundation",
        Phase::Sections => "sections",
        Phase::CustomPages => "custom_pages",
    };
    progress.emit_event_best_effort(
        "phase_started",
        &PhaseStartedData {
            phase: name.to_string(),
        },
    );
}

/// Phase 2 results by kind, filled after the join.
#[derive(Default)]
struct SectionSlots {
    about: Option<AboutSection>,
    contact: Option<ContactSection>,
    testimonials: Option<TestimonialsSection>,
    values: Option<ValuesSection>,
    features: Option<FeaturesSection>,
    services: Option<ServicesSection>,
    team: Option<TeamSection>,
}

impl SectionSlots {
    fn fill(&mut self, section: GeneratedSection) {
        match section {
            GeneratedSection::About(s) => self.about = Some(s),
            GeneratedSection::Contact(s) => self.contact = Some(s),
            GeneratedSection::Testimonials(s) => self.testimonials = Some(s),
            GeneratedSection::Values(s) => self.values = Some(s),
            GeneratedSection::Features(s) => self.features = Some(s),
            GeneratedSection::Services(s) => self.services = Some(s),
            GeneratedSection::Team(s) => self.team = Some(s),
        }
    }
}
