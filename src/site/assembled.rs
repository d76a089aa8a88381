//! The terminal aggregate persisted by the content store.

use crate::site::sections::{
    AboutSection, Branding, ContactSection, CustomPageSection, FeaturesSection, FoundationData,
    HeroSection, SeoDefaults, ServicesSection, TeamSection, TestimonialsSection, ValuesSection,
};
use serde::{Deserialize, Serialize};

/// Closed record of generation bookkeeping stored alongside the content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationMetadata {
    /// RFC 3339 timestamp of assembly
    pub generated_at: String,
    pub duration_ms: u64,
    /// Markers for units that did not succeed; surfaced to users as "needs review"
    #[serde(default)]
    pub failed_sections: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Everything generated for one site. Shape is stable regardless of which optional
/// sections succeeded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedSiteData {
    pub site_name: String,
    pub tagline: String,
    pub description: String,
    pub hero: HeroSection,
    pub branding: Branding,
    pub seo: SeoDefaults,
    pub about: AboutSection,
    pub contact: ContactSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testimonials: Option<TestimonialsSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<ValuesSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<FeaturesSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<ServicesSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_pages: Option<Vec<CustomPageSection>>,
    pub metadata: GenerationMetadata,
}

impl GeneratedSiteData {
    /// Start from the foundation plus the two always-present sections.
    pub fn from_foundation(
        foundation: FoundationData,
        about: AboutSection,
        contact: ContactSection,
        metadata: GenerationMetadata,
    ) -> Self {
        Self {
            site_name: foundation.site_name,
            tagline: foundation.tagline,
            description: foundation.description,
            hero: foundation.hero,
            branding: foundation.branding,
            seo: foundation.seo,
            about,
            contact,
            testimonials: None,
            values: None,
            features: None,
            services: None,
            team: None,
            custom_pages: None,
            metadata,
        }
    }

    /// Number of optional sections that made it into the result.
    pub fn optional_section_count(&self) -> usize {
        [
            self.testimonials.is_some(),
            self.values.is_some(),
            self.features.is_some(),
            self.services.is_some(),
            self.team.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}
