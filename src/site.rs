//! Site data model
//!
//! Inputs to a generation job ([`BusinessInfo`], [`ScrapedWebsiteContext`]), the typed
//! content blocks the generators produce, and the assembled [`GeneratedSiteData`] handed
//! to the content store. Everything here is created fresh per job.

pub mod assembled;
pub mod business;
pub mod sections;

pub use assembled::{GeneratedSiteData, GenerationMetadata};
pub use business::{
    BusinessInfo, FaqEntry, RecommendedPage, ScrapedBusinessMetadata, ScrapedContent,
    ScrapedWebsiteContext, TypographyHints,
};
pub use sections::{
    AboutSection, Branding, ContactSection, ContentItem, CustomPageContent, CustomPageItem,
    CustomPageSection, FeaturesSection, FoundationData, HeroSection, SeoDefaults, ServiceItem,
    ServicesSection, TeamMember, TeamSection, Testimonial, TestimonialsSection, ValuesSection,
};

/// Lowercase, hyphen-separated, ASCII alphanumeric slug. Empty input yields `"page"`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "page".to_string()
    } else {
        slug
    }
}
