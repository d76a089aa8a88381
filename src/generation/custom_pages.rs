//! Phase 3: FAQ and recommended custom pages.
//!
//! Only runs when scraped context carries FAQ pairs or recommended pages. The FAQ page
//! never depends on the model: if the response does not reproduce the source pairs
//! exactly, the page is built straight from the scraped data. Recommended pages are
//! generated one at a time to cap simultaneous outbound calls.

use crate::generation::outcome::{FailureReason, Phase, SectionOutcome};
use crate::generation::parse::parse_custom_page_response;
use crate::generation::prompts::{
    custom_page_prompt, faq_prompt, CUSTOM_PAGE_SYSTEM_PROMPT, FAQ_SYSTEM_PROMPT,
};
use crate::generation::settings::GenerationSettings;
use crate::generation::usage::UsageLedger;
use crate::provider::LlmCaller;
use crate::site::{
    BusinessInfo, CustomPageContent, CustomPageItem, CustomPageSection, FaqEntry,
    FoundationData, RecommendedPage, ScrapedWebsiteContext,
};
use std::collections::HashSet;
use tracing::{debug, warn};

pub const FAQ_PAGE_TYPE: &str = "faq";
pub const FAQ_PAGE_TITLE: &str = "Frequently Asked Questions";

/// Page types the standard sections (or other product surfaces) already cover.
pub const STANDARD_PAGE_TYPES: &[&str] = &[
    "home",
    "about",
    "contact",
    "services",
    "team",
    "testimonials",
    "values",
    "features",
    "faq",
    "blog",
    "products",
];

pub fn should_generate_custom_pages(scraped: Option<&ScrapedWebsiteContext>) -> bool {
    scraped.map_or(false, ScrapedWebsiteContext::has_custom_page_material)
}

/// Non-standard, de-duplicated recommendations in input order, capped at `max_pages`.
pub fn select_recommended_pages(
    recommended: &[RecommendedPage],
    max_pages: usize,
) -> Vec<&RecommendedPage> {
    let mut seen = HashSet::new();
    recommended
        .iter()
        .filter(|page| {
            let key = page.page_type.trim().to_ascii_lowercase();
            !key.is_empty() && !STANDARD_PAGE_TYPES.contains(&key.as_str()) && seen.insert(key)
        })
        .take(max_pages)
        .collect()
}

/// Deterministic FAQ page copied from scraped pairs.
pub fn build_faq_fallback(info: &BusinessInfo, faq: &[FaqEntry]) -> CustomPageSection {
    CustomPageSection {
        page_type: FAQ_PAGE_TYPE.to_string(),
        title: FAQ_PAGE_TITLE.to_string(),
        slug: FAQ_PAGE_TYPE.to_string(),
        content: CustomPageContent {
            headline: FAQ_PAGE_TITLE.to_string(),
            description: format!("Answers to common questions about {}.", info.name.trim()),
            items: faq
                .iter()
                .map(|entry| CustomPageItem {
                    title: entry.question.clone(),
                    description: entry.answer.clone(),
                })
                .collect(),
            rich_text: None,
        },
    }
}

/// Whether `page` contains exactly the source pairs, verbatim, in any order.
pub fn faq_preserves_source(page: &CustomPageSection, faq: &[FaqEntry]) -> bool {
    if page.content.items.len() != faq.len() {
        return false;
    }
    let mut remaining: Vec<(&str, &str)> = faq
        .iter()
        .map(|e| (e.question.as_str(), e.answer.as_str()))
        .collect();
    page.content.items.iter().all(|item| {
        match remaining
            .iter()
            .position(|(q, a)| *q == item.title && *a == item.description)
        {
            Some(idx) => {
                remaining.swap_remove(idx);
                true
            }
            None => false,
        }
    })
}

#[derive(Debug, Clone)]
pub struct FaqRun {
    pub page: CustomPageSection,
    /// Set when the deterministic page was used instead of the model's.
    pub fallback: Option<FailureReason>,
    pub usage: UsageLedger,
}

pub async fn generate_faq_page(
    caller: &LlmCaller,
    settings: &GenerationSettings,
    info: &BusinessInfo,
    faq: &[FaqEntry],
) -> FaqRun {
    let mut usage = UsageLedger::default();
    let reason = match caller
        .generate(&faq_prompt(info, faq), FAQ_SYSTEM_PROMPT, &settings.faq_options())
        .await
    {
        Ok(response) => {
            usage.record_call(response.usage.as_ref());
            match parse_custom_page_response(&response.content, FAQ_PAGE_TYPE, FAQ_PAGE_TITLE) {
                Some(page) if faq_preserves_source(&page, faq) => {
                    debug!(items = faq.len(), "FAQ page generated");
                    return FaqRun {
                        page: CustomPageSection {
                            slug: FAQ_PAGE_TYPE.to_string(),
                            ..page
                        },
                        fallback: None,
                        usage,
                    };
                }
                Some(_) => FailureReason::ContentDrift,
                None => FailureReason::Unparseable {
                    finish_reason: response.finish_reason.as_str().to_string(),
                },
            }
        }
        Err(err) => FailureReason::CallFailed {
            error: err.to_string(),
        },
    };
    warn!(reason = %reason, "FAQ page built from scraped data");
    FaqRun {
        page: build_faq_fallback(info, faq),
        fallback: Some(reason),
        usage,
    }
}

#[derive(Debug, Clone)]
pub struct CustomPageRun {
    pub page_type: String,
    pub outcome: SectionOutcome<CustomPageSection>,
    pub usage: UsageLedger,
}

pub async fn generate_custom_page(
    caller: &LlmCaller,
    settings: &GenerationSettings,
    info: &BusinessInfo,
    foundation: &FoundationData,
    page: &RecommendedPage,
    page_text: Option<&str>,
) -> CustomPageRun {
    let page_type = page.page_type.trim().to_string();
    let default_title = page
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| title_case(&page.page_type));
    let mut usage = UsageLedger::default();

    let outcome = match caller
        .generate(
            &custom_page_prompt(info, foundation, page, page_text),
            CUSTOM_PAGE_SYSTEM_PROMPT,
            &settings.custom_page_options(),
        )
        .await
    {
        Ok(response) => {
            usage.record_call(response.usage.as_ref());
            match parse_custom_page_response(&response.content, &page_type, &default_title) {
                Some(section) => SectionOutcome::Generated(section),
                None => SectionOutcome::failed(
                    Phase::CustomPages,
                    FailureReason::Unparseable {
                        finish_reason: response.finish_reason.as_str().to_string(),
                    },
                ),
            }
        }
        Err(err) => SectionOutcome::failed(
            Phase::CustomPages,
            FailureReason::CallFailed {
                error: err.to_string(),
            },
        ),
    };
    if let SectionOutcome::Failed { reason, .. } = &outcome {
        warn!(page_type = %page_type, reason = %reason, "Custom page generation failed");
    }
    CustomPageRun {
        page_type,
        outcome,
        usage,
    }
}

fn title_case(page_type: &str) -> String {
    page_type
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Recommended pages, strictly one call at a time.
pub async fn generate_recommended_pages(
    caller: &LlmCaller,
    settings: &GenerationSettings,
    info: &BusinessInfo,
    foundation: &FoundationData,
    scraped: &ScrapedWebsiteContext,
) -> Vec<CustomPageRun> {
    let mut runs = Vec::new();
    for page in select_recommended_pages(&scraped.recommended_pages, settings.max_custom_pages) {
        let page_text = scraped.page_text(&page.page_type);
        runs.push(generate_custom_page(caller, settings, info, foundation, page, page_text).await);
    }
    runs
}

#[derive(Debug, Clone, Default)]
pub struct CustomPagesRun {
    pub faq: Option<FaqRun>,
    pub pages: Vec<CustomPageRun>,
}

/// FAQ and recommended flows run concurrently with each other.
pub async fn generate_custom_pages(
    caller: &LlmCaller,
    settings: &GenerationSettings,
    info: &BusinessInfo,
    foundation: &FoundationData,
    scraped: &ScrapedWebsiteContext,
) -> CustomPagesRun {
    let faq_flow = async {
        if scraped.faq().is_empty() {
            None
        } else {
            Some(generate_faq_page(caller, settings, info, scraped.faq()).await)
        }
    };
    let pages_flow = generate_recommended_pages(caller, settings, info, foundation, scraped);
    let (faq, pages) = futures::join!(faq_flow, pages_flow);
    CustomPagesRun { faq, pages }
}
