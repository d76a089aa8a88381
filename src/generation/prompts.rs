//! Prompt templates.
//!
//! Pure functions from job inputs to prompt strings. Every template names the exact JSON
//! shape the matching parser in [`crate::generation::parse`] accepts.

use crate::generation::settings::SectionKind;
use crate::site::{BusinessInfo, FaqEntry, FoundationData, RecommendedPage, ScrapedWebsiteContext};

/// Scraped page text beyond this many characters is cut before embedding.
pub const MAX_PAGE_TEXT_CHARS: usize = 4000;

pub const FOUNDATION_SYSTEM_PROMPT: &str = "You are a brand strategist and web designer. \
You create the identity, color palette and hero content for small business websites. \
Respond with a single JSON object and nothing else.";

pub const ABOUT_SYSTEM_PROMPT: &str = "You are a copywriter who writes warm, specific About pages \
for small businesses. Respond with a single JSON object and nothing else.";

pub const CONTACT_SYSTEM_PROMPT: &str = "You prepare contact sections for business websites. \
Only use contact details that were provided; never invent email addresses, phone numbers or \
street addresses. Respond with a single JSON object and nothing else.";

pub const TESTIMONIALS_SYSTEM_PROMPT: &str = "You write realistic, varied customer testimonials \
for small business websites. Respond with a single JSON object and nothing else.";

pub const VALUES_SYSTEM_PROMPT: &str = "You articulate the core values of small businesses in \
plain language. Respond with a single JSON object and nothing else.";

pub const FEATURES_SYSTEM_PROMPT: &str = "You describe what sets a small business apart from its \
competitors. Respond with a single JSON object and nothing else.";

pub const SERVICES_SYSTEM_PROMPT: &str = "You write clear service listings for small business \
websites. Respond with a single JSON object and nothing else.";

pub const TEAM_SYSTEM_PROMPT: &str = "You write short team introductions for small business \
websites. Respond with a single JSON object and nothing else.";

pub const FAQ_SYSTEM_PROMPT: &str = "You format FAQ pages. You never write new questions or \
answers and never reword the ones you are given; you only organize them. \
Respond with a single JSON object and nothing else.";

pub const CUSTOM_PAGE_SYSTEM_PROMPT: &str = "You write focused secondary pages for small business \
websites, grounded in whatever existing material is supplied. \
Respond with a single JSON object and nothing else.";

pub fn section_system_prompt(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::About => ABOUT_SYSTEM_PROMPT,
        SectionKind::Contact => CONTACT_SYSTEM_PROMPT,
        SectionKind::Testimonials => TESTIMONIALS_SYSTEM_PROMPT,
        SectionKind::Values => VALUES_SYSTEM_PROMPT,
        SectionKind::Features => FEATURES_SYSTEM_PROMPT,
        SectionKind::Services => SERVICES_SYSTEM_PROMPT,
        SectionKind::Team => TEAM_SYSTEM_PROMPT,
    }
}

/// Bullet list describing the business, shared by every template.
pub fn business_context(info: &BusinessInfo) -> String {
    let mut lines = vec![
        format!("- Name: {}", info.name.trim()),
        format!("- Request: {}", info.prompt.trim()),
    ];
    if let Some(industry) = non_blank(info.industry.as_deref()) {
        lines.push(format!("- Industry: {}", industry));
    }
    if let Some(location) = non_blank(info.location.as_deref()) {
        lines.push(format!("- Location: {}", location));
    }
    lines.join("\n")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn scraped_summary(scraped: &ScrapedWebsiteContext) -> String {
    let mut lines = Vec::new();
    if let Some(name) = non_blank(scraped.content.business_name.as_deref()) {
        lines.push(format!("- Existing site name: {}", name));
    }
    if let Some(description) = non_blank(scraped.content.description.as_deref()) {
        lines.push(format!("- Existing description: {}", description));
    }
    if !scraped.content.services.is_empty() {
        lines.push(format!(
            "- Services offered: {}",
            scraped.content.services.join(", ")
        ));
    }
    if !scraped.business.brand_colors.is_empty() {
        lines.push(format!(
            "- Current brand colors: {}",
            scraped.business.brand_colors.join(", ")
        ));
    }
    if let Some(typography) = &scraped.business.typography {
        if let Some(font) = non_blank(typography.heading_font.as_deref()) {
            lines.push(format!("- Current heading font: {}", font));
        }
        if let Some(font) = non_blank(typography.body_font.as_deref()) {
            lines.push(format!("- Current body font: {}", font));
        }
    }
    lines.join("\n")
}

fn theme_context(foundation: &FoundationData) -> String {
    format!(
        "- Site name: {}\n- Tagline: {}\n- Primary color: {}\n- Secondary color: {}",
        foundation.site_name,
        foundation.tagline,
        foundation.branding.primary_color,
        foundation.branding.secondary_color
    )
}

const FOUNDATION_SHAPE: &str = r##"{
  "site_name": "string",
  "tagline": "short memorable line",
  "description": "one or two sentences",
  "hero": {"headline": "string", "subheadline": "string", "cta_text": "string", "cta_link": "#contact"},
  "branding": {"primary_color": "#rrggbb", "secondary_color": "#rrggbb", "accent_color": "#rrggbb",
               "heading_font": "Google font name", "body_font": "Google font name"},
  "seo": {"title": "string", "description": "under 160 characters", "keywords": ["string"]}
}"##;

/// Phase 1 prompt. With scraped context the enriched variant asks the model to stay
/// consistent with the existing brand.
pub fn foundation_prompt(info: &BusinessInfo, scraped: Option<&ScrapedWebsiteContext>) -> String {
    let mut prompt = format!(
        "Create the foundation for a business website.\n\nBusiness:\n{}\n",
        business_context(info)
    );
    if let Some(scraped) = scraped {
        let summary = scraped_summary(scraped);
        if !summary.is_empty() {
            prompt.push_str(&format!(
                "\nThe business already has a website. Keep the new identity recognizably \
                 consistent with it:\n{}\n",
                summary
            ));
        }
    }
    prompt.push_str(&format!(
        "\nReturn JSON with exactly this shape:\n{}\n",
        FOUNDATION_SHAPE
    ));
    prompt
}

fn section_shape(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::About => {
            r#"{"title": "About Us", "content": "two or three paragraphs", "mission": "one sentence", "story": "short origin story", "highlights": ["string"]}"#
        }
        SectionKind::Contact => {
            r#"{"title": "Contact Us", "email": "string or null", "phone": "string or null", "address": "string or null", "hours": "string or null"}"#
        }
        SectionKind::Testimonials => {
            r#"{"title": "What Our Customers Say", "items": [{"quote": "string", "author": "first name and last initial", "role": "string", "rating": 5}]}"#
        }
        SectionKind::Values => {
            r#"{"title": "Our Values", "subtitle": "string", "items": [{"title": "string", "description": "string"}]}"#
        }
        SectionKind::Features => {
            r#"{"title": "Why Choose Us", "subtitle": "string", "items": [{"title": "string", "description": "string"}]}"#
        }
        SectionKind::Services => {
            r#"{"title": "Our Services", "subtitle": "string", "items": [{"name": "string", "description": "string", "price": "string or null", "duration": "string or null"}]}"#
        }
        SectionKind::Team => {
            r#"{"title": "Meet the Team", "subtitle": "string", "members": [{"name": "string", "role": "string", "bio": "string"}]}"#
        }
    }
}

fn section_instructions(kind: SectionKind, info: &BusinessInfo) -> String {
    match kind {
        SectionKind::About => "Write the About section. Be concrete about what the business does \
                               and who it serves."
            .to_string(),
        SectionKind::Contact => {
            let mut known = Vec::new();
            if let Some(email) = non_blank(info.email.as_deref()) {
                known.push(format!("- Email: {}", email));
            }
            if let Some(phone) = non_blank(info.phone.as_deref()) {
                known.push(format!("- Phone: {}", phone));
            }
            if let Some(location) = non_blank(info.location.as_deref()) {
                known.push(format!("- Area: {}", location));
            }
            let known = if known.is_empty() {
                "none provided".to_string()
            } else {
                known.join("\n")
            };
            format!(
                "Write the Contact section. Known contact details:\n{}\n\
                 Use null for anything not listed; suggest typical opening hours only if \
                 they are reasonable for this kind of business.",
                known
            )
        }
        SectionKind::Testimonials => {
            "Write 3 customer testimonials with different voices and concerns.".to_string()
        }
        SectionKind::Values => "List 3 to 4 core values.".to_string(),
        SectionKind::Features => "List 3 to 6 reasons customers choose this business.".to_string(),
        SectionKind::Services => "List 3 to 6 services this business offers.".to_string(),
        SectionKind::Team => "Introduce 2 to 4 team members.".to_string(),
    }
}

/// Phase 2 prompt for one section, referencing the foundation branding.
pub fn section_prompt(
    kind: SectionKind,
    info: &BusinessInfo,
    foundation: &FoundationData,
    scraped: Option<&ScrapedWebsiteContext>,
) -> String {
    let mut prompt = format!(
        "{}\n\nBusiness:\n{}\n\nBrand:\n{}\n",
        section_instructions(kind, info),
        business_context(info),
        theme_context(foundation)
    );
    if let Some(text) = scraped.and_then(|s| s.page_text(kind.as_str())) {
        prompt.push_str(&format!(
            "\nExisting {} page text (reuse facts, not wording):\n{}\n",
            kind.as_str(),
            truncate_chars(text, MAX_PAGE_TEXT_CHARS)
        ));
    } else if kind == SectionKind::Services {
        if let Some(scraped) = scraped.filter(|s| !s.content.services.is_empty()) {
            prompt.push_str(&format!(
                "\nServices listed on the existing site: {}\n",
                scraped.content.services.join(", ")
            ));
        }
    }
    prompt.push_str(&format!(
        "\nReturn JSON with exactly this shape:\n{}\n",
        section_shape(kind)
    ));
    prompt
}

/// FAQ prompt embedding the exact source pairs.
pub fn faq_prompt(info: &BusinessInfo, faq: &[FaqEntry]) -> String {
    let pairs = serde_json::to_string_pretty(faq).unwrap_or_else(|_| "[]".to_string());
    format!(
        "Build the FAQ page for {name}.\n\n\
         Here are the exact questions and answers from the existing site:\n{pairs}\n\n\
         Rules:\n\
         - Use every pair exactly once.\n\
         - Copy each question and answer character for character. Do not fix, shorten or \
           rephrase them.\n\
         - Do not add questions.\n\
         - You may reorder pairs and write the headline and description.\n\n\
         Return JSON with exactly this shape:\n\
         {{\"title\": \"Frequently Asked Questions\", \"slug\": \"faq\", \"content\": \
         {{\"headline\": \"string\", \"description\": \"string\", \
         \"items\": [{{\"title\": \"question\", \"description\": \"answer\"}}]}}}}\n",
        name = info.name.trim(),
        pairs = pairs
    )
}

/// Prompt for one recommended page.
pub fn custom_page_prompt(
    info: &BusinessInfo,
    foundation: &FoundationData,
    page: &RecommendedPage,
    page_text: Option<&str>,
) -> String {
    let title = page
        .title
        .as_deref()
        .and_then(|t| non_blank(Some(t)))
        .unwrap_or(&page.page_type);
    let mut prompt = format!(
        "Write the \"{}\" page (page type: {}).\n\nBusiness:\n{}\n\nBrand:\n{}\n",
        title,
        page.page_type,
        business_context(info),
        theme_context(foundation)
    );
    if let Some(reason) = non_blank(page.reason.as_deref()) {
        prompt.push_str(&format!("\nWhy this page matters: {}\n", reason));
    }
    if let Some(text) = page_text {
        prompt.push_str(&format!(
            "\nExisting page text (reuse facts, not wording):\n{}\n",
            truncate_chars(text, MAX_PAGE_TEXT_CHARS)
        ));
    }
    prompt.push_str(
        "\nReturn JSON with exactly this shape:\n\
         {\"title\": \"string\", \"slug\": \"url-slug\", \"content\": {\"headline\": \"string\", \
         \"description\": \"string\", \"items\": [{\"title\": \"string\", \"description\": \"string\"}], \
         \"rich_text\": \"optional markdown body\"}}\n",
    );
    prompt
}
