//! Job inputs: the business being described and optional scraped context.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Describes the business a site is generated for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BusinessInfo {
    /// Free-text description of what the user wants
    pub prompt: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl BusinessInfo {
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            name: name.into(),
            industry: None,
            location: None,
            email: None,
            phone: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_contact(mut self, email: Option<String>, phone: Option<String>) -> Self {
        self.email = email;
        self.phone = phone;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Business name cannot be empty".to_string());
        }
        if self.prompt.trim().is_empty() {
            return Err("Business prompt cannot be empty".to_string());
        }
        Ok(())
    }
}

/// One question/answer pair lifted from an existing site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// A page the scraper suggests the new site should carry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendedPage {
    pub page_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapedContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub faq: Vec<FaqEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypographyHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_font: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapedBusinessMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_background_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography: Option<TypographyHints>,
    #[serde(default)]
    pub brand_colors: Vec<String>,
}

/// Pre-scraped data about the business's existing website.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapedWebsiteContext {
    #[serde(default)]
    pub content: ScrapedContent,
    /// Raw page text keyed by page type
    #[serde(default)]
    pub page_texts: BTreeMap<String, String>,
    #[serde(default)]
    pub recommended_pages: Vec<RecommendedPage>,
    #[serde(default)]
    pub business: ScrapedBusinessMetadata,
}

impl ScrapedWebsiteContext {
    pub fn faq(&self) -> &[FaqEntry] {
        &self.content.faq
    }

    pub fn page_text(&self, page_type: &str) -> Option<&str> {
        self.page_texts
            .get(page_type)
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
    }

    /// Whether this context carries anything that can seed custom pages.
    pub fn has_custom_page_material(&self) -> bool {
        !self.content.faq.is_empty() || !self.recommended_pages.is_empty()
    }
}
