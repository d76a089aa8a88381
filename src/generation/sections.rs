//! Phase 2: the seven section generators.

use crate::generation::outcome::{FailureReason, Phase, SectionOutcome};
use crate::generation::parse;
use crate::generation::prompts::{section_prompt, section_system_prompt};
use crate::generation::settings::{GenerationSettings, SectionKind};
use crate::generation::usage::UsageLedger;
use crate::provider::LlmCaller;
use crate::site::{
    AboutSection, BusinessInfo, ContactSection, FeaturesSection, FoundationData,
    ScrapedWebsiteContext, ServicesSection, TeamSection, TestimonialsSection, ValuesSection,
};
use futures::future::join_all;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedSection {
    About(AboutSection),
    Contact(ContactSection),
    Testimonials(TestimonialsSection),
    Values(ValuesSection),
    Features(FeaturesSection),
    Services(ServicesSection),
    Team(TeamSection),
}

impl GeneratedSection {
    pub fn kind(&self) -> SectionKind {
        match self {
            GeneratedSection::About(_) => SectionKind::About,
            GeneratedSection::Contact(_) => SectionKind::Contact,
            GeneratedSection::Testimonials(_) => SectionKind::Testimonials,
            GeneratedSection::Values(_) => SectionKind::Values,
            GeneratedSection::Features(_) => SectionKind::Features,
            GeneratedSection::Services(_) => SectionKind::Services,
            GeneratedSection::Team(_) => SectionKind::Team,
        }
    }
}

/// Dispatch raw model output to the parser for `kind`.
pub fn parse_section(kind: SectionKind, raw: &str) -> Option<GeneratedSection> {
    match kind {
        SectionKind::About => parse::parse_about_response(raw).map(GeneratedSection::About),
        SectionKind::Contact => parse::parse_contact_response(raw).map(GeneratedSection::Contact),
        SectionKind::Testimonials => {
            parse::parse_testimonials_response(raw).map(GeneratedSection::Testimonials)
        }
        SectionKind::Values => parse::parse_values_response(raw).map(GeneratedSection::Values),
        SectionKind::Features => {
            parse::parse_features_response(raw).map(GeneratedSection::Features)
        }
        SectionKind::Services => {
            parse::parse_services_response(raw).map(GeneratedSection::Services)
        }
        SectionKind::Team => parse::parse_team_response(raw).map(GeneratedSection::Team),
    }
}

/// One settled Phase 2 unit.
#[derive(Debug, Clone)]
pub struct SectionRun {
    pub kind: SectionKind,
    pub outcome: SectionOutcome<GeneratedSection>,
    pub usage: UsageLedger,
}

pub async fn generate_section(
    caller: &LlmCaller,
    settings: &GenerationSettings,
    kind: SectionKind,
    info: &BusinessInfo,
    foundation: &FoundationData,
    scraped: Option<&ScrapedWebsiteContext>,
) -> SectionRun {
    let prompt = section_prompt(kind, info, foundation, scraped);
    let mut usage = UsageLedger::default();

    let response = match caller
        .generate(&prompt, section_system_prompt(kind), &settings.section_options(kind))
        .await
    {
        Ok(response) => response,
        Err(err) => {
            warn!(section = kind.as_str(), error = %err, "Section call failed");
            return SectionRun {
                kind,
                outcome: SectionOutcome::failed(
                    Phase::Sections,
                    FailureReason::CallFailed {
                        error: err.to_string(),
                    },
                ),
                usage,
            };
        }
    };
    usage.record_call(response.usage.as_ref());
    debug!(
        section = kind.as_str(),
        total_tokens = usage.tokens.total_tokens,
        finish_reason = response.finish_reason.as_str(),
        "Section response received"
    );

    let outcome = match parse_section(kind, &response.content) {
        Some(section) => SectionOutcome::Generated(section),
        None => {
            warn!(
                section = kind.as_str(),
                finish_reason = response.finish_reason.as_str(),
                "Section response could not be parsed"
            );
            SectionOutcome::failed(
                Phase::Sections,
                FailureReason::Unparseable {
                    finish_reason: response.finish_reason.as_str().to_string(),
                },
            )
        }
    };
    SectionRun {
        kind,
        outcome,
        usage,
    }
}

/// Issue all seven section calls together and wait for every one to settle. Results come
/// back in [`SectionKind::ALL`] order regardless of completion order.
pub async fn generate_all_sections(
    caller: &LlmCaller,
    settings: &GenerationSettings,
    info: &BusinessInfo,
    foundation: &FoundationData,
    scraped: Option<&ScrapedWebsiteContext>,
) -> Vec<SectionRun> {
    join_all(
        SectionKind::ALL
            .iter()
            .map(|kind| generate_section(caller, settings, *kind, info, foundation, scraped)),
    )
    .await
}
