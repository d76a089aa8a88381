//! Phase 1: foundation generation.

use crate::error::ApiError;
use crate::generation::parse::parse_foundation_response;
use crate::generation::prompts::{foundation_prompt, FOUNDATION_SYSTEM_PROMPT};
use crate::generation::settings::GenerationSettings;
use crate::generation::usage::UsageLedger;
use crate::provider::LlmCaller;
use crate::site::{BusinessInfo, FoundationData, ScrapedWebsiteContext};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct FoundationOutput {
    pub foundation: FoundationData,
    pub usage: UsageLedger,
}

/// Generate the foundation. A truncated first response is re-issued once at the higher
/// ceiling; any call or parse failure is fatal and discards the usage recorded so far.
pub async fn generate_foundation(
    caller: &LlmCaller,
    settings: &GenerationSettings,
    info: &BusinessInfo,
    scraped: Option<&ScrapedWebsiteContext>,
) -> Result<FoundationOutput, ApiError> {
    let prompt = foundation_prompt(info, scraped);
    let mut usage = UsageLedger::default();

    let first = caller
        .generate(&prompt, FOUNDATION_SYSTEM_PROMPT, &settings.foundation_options())
        .await
        .map_err(|e| ApiError::FoundationFailed(e.to_string()))?;
    usage.record_call(first.usage.as_ref());

    let response = if first.finish_reason.is_truncated() {
        let retry_options = settings.foundation_retry_options();
        warn!(
            max_tokens = retry_options.max_tokens,
            "Foundation response truncated, retrying with a higher token ceiling"
        );
        let retried = caller
            .generate(&prompt, FOUNDATION_SYSTEM_PROMPT, &retry_options)
            .await
            .map_err(|e| ApiError::FoundationFailed(e.to_string()))?;
        usage.record_call(retried.usage.as_ref());
        retried
    } else {
        first
    };

    let mut foundation = parse_foundation_response(&response.content).ok_or_else(|| {
        ApiError::FoundationFailed(format!(
            "unparseable response (finish reason: {})",
            response.finish_reason.as_str()
        ))
    })?;
    if let Some(scraped) = scraped {
        apply_scraped_metadata(&mut foundation, scraped);
    }

    debug!(
        site_name = %foundation.site_name,
        calls = usage.calls,
        total_tokens = usage.tokens.total_tokens,
        "Foundation generated"
    );
    Ok(FoundationOutput { foundation, usage })
}

/// Carry the existing site's hero image and fonts into the foundation when the model
/// left them empty.
pub fn apply_scraped_metadata(foundation: &mut FoundationData, scraped: &ScrapedWebsiteContext) {
    let metadata = &scraped.business;
    if foundation.hero.background_image.is_none() {
        foundation.hero.background_image = metadata
            .hero_background_image
            .clone()
            .filter(|url| !url.trim().is_empty());
    }
    if let Some(typography) = &metadata.typography {
        if foundation.branding.heading_font.is_none() {
            foundation.branding.heading_font = typography.heading_font.clone();
        }
        if foundation.branding.body_font.is_none() {
            foundation.branding.body_font = typography.body_font.clone();
        }
    }
}
