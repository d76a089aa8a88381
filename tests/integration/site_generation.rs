//! End-to-end generation through the public `SiteGenerator` API.

use crate::integration::test_utils::{
    generator, ScriptedProvider, ABOUT_JSON, COMPLETION_TOKENS, CONTACT_JSON, FOUNDATION_JSON,
    PROMPT_TOKENS,
};
use sitegen::error::ApiError;
use sitegen::generation::prompts::{
    ABOUT_SYSTEM_PROMPT, CONTACT_SYSTEM_PROMPT, FEATURES_SYSTEM_PROMPT, FOUNDATION_SYSTEM_PROMPT,
    SERVICES_SYSTEM_PROMPT, TEAM_SYSTEM_PROMPT, TESTIMONIALS_SYSTEM_PROMPT, VALUES_SYSTEM_PROMPT,
};
use sitegen::generation::{FailedUnit, FailureReason, PricingTable};
use sitegen::site::{BusinessInfo, ContactSection};
use sitegen::telemetry::MemoryProgressSink;
use std::sync::Arc;
use std::time::Duration;

fn green_thumb() -> BusinessInfo {
    BusinessInfo::new(
        "Green Thumb Gardens",
        "A neighborhood garden center with native plants and workshops",
    )
    .with_location("Portland, OR")
}

#[tokio::test]
async fn full_run_without_scraped_context() {
    let provider = Arc::new(ScriptedProvider::all_valid());

    let result = generator(&provider)
        .generate_site_content(&green_thumb(), None)
        .await
        .unwrap();

    assert_eq!(result.data.site_name, "Green Thumb Gardens");
    assert_eq!(result.data.branding.primary_color, "#2f6b3a");
    assert!(!result.data.about.content.is_empty());
    assert_eq!(result.data.contact.phone.as_deref(), Some("503-555-0100"));
    assert!(result.data.testimonials.is_some());
    assert!(result.data.values.is_some());
    assert!(result.data.features.is_some());
    assert!(result.data.services.is_some());
    assert!(result.data.team.is_some());
    assert!(result.data.custom_pages.is_none());

    assert_eq!(result.total_calls, 8);
    assert!(result.failed_sections.is_empty());
    assert!(result.failures.is_empty());
    assert_eq!(result.token_usage.prompt_tokens, 8 * PROMPT_TOKENS);
    assert_eq!(result.token_usage.completion_tokens, 8 * COMPLETION_TOKENS);
    assert_eq!(
        result.token_usage.total_tokens,
        result.token_usage.prompt_tokens + result.token_usage.completion_tokens
    );
    assert_eq!(result.total_cost_cents, 0.0);
    assert_eq!(result.data.metadata.model.as_deref(), Some("scripted-model"));
    assert!(result.data.metadata.generated_at.ends_with('Z'));
    assert_eq!(provider.calls().len(), 8);
}

#[tokio::test]
async fn every_call_carries_business_context() {
    let provider = Arc::new(ScriptedProvider::all_valid());

    generator(&provider)
        .generate_site_content(&green_thumb(), None)
        .await
        .unwrap();

    for call in provider.calls() {
        assert!(call.user_prompt.contains("Green Thumb Gardens"));
        assert!(call.user_prompt.contains("Portland, OR"));
    }
    let foundation_call = &provider.calls_for(FOUNDATION_SYSTEM_PROMPT)[0];
    assert_eq!(foundation_call.temperature, Some(0.8));
    assert_eq!(foundation_call.max_tokens, Some(3000));
    assert!(!foundation_call.user_prompt.contains("already has a website"));
}

#[tokio::test]
async fn truncated_foundation_is_retried_once_with_higher_ceiling() {
    let provider = Arc::new(
        ScriptedProvider::all_valid()
            .clear(FOUNDATION_SYSTEM_PROMPT)
            .reply_with_finish(FOUNDATION_SYSTEM_PROMPT, r#"{"site_name": "Green Th"#, "length")
            .reply(FOUNDATION_SYSTEM_PROMPT, FOUNDATION_JSON),
    );

    let result = generator(&provider)
        .generate_site_content(&green_thumb(), None)
        .await
        .unwrap();

    let foundation_calls = provider.calls_for(FOUNDATION_SYSTEM_PROMPT);
    assert_eq!(foundation_calls.len(), 2);
    assert_eq!(foundation_calls[0].max_tokens, Some(3000));
    assert_eq!(foundation_calls[1].max_tokens, Some(4000));
    assert_eq!(result.total_calls, 9);
}

#[tokio::test]
async fn foundation_failure_aborts_before_sections() {
    let provider = Arc::new(
        ScriptedProvider::all_valid()
            .clear(FOUNDATION_SYSTEM_PROMPT)
            .reply(FOUNDATION_SYSTEM_PROMPT, "Sorry, I can't produce JSON today."),
    );

    let err = generator(&provider)
        .generate_site_content(&green_thumb(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::SiteGenerationFailed(_)));
    assert!(err
        .to_string()
        .starts_with("Site generation failed: Foundation generation failed"));
    assert_eq!(provider.calls().len(), 1);
}

#[tokio::test]
async fn about_failure_aborts_the_job() {
    let provider = Arc::new(
        ScriptedProvider::all_valid()
            .clear(ABOUT_SYSTEM_PROMPT)
            .fail(ABOUT_SYSTEM_PROMPT, "upstream exploded"),
    );

    let err = generator(&provider)
        .generate_site_content(&green_thumb(), None)
        .await
        .unwrap_err();

    match err {
        ApiError::SiteGenerationFailed(inner) => {
            assert!(matches!(*inner, ApiError::RequiredSectionMissing(ref s) if s == "about"));
        }
        other => panic!("unexpected error: {other}"),
    }
    // All seven sections were still attempted.
    assert_eq!(provider.calls().len(), 8);
}

#[tokio::test]
async fn optional_failures_are_reported_in_section_order() {
    let provider = Arc::new(
        ScriptedProvider::all_valid()
            .clear(TEAM_SYSTEM_PROMPT)
            .fail(TEAM_SYSTEM_PROMPT, "boom")
            .clear(TESTIMONIALS_SYSTEM_PROMPT)
            .reply(TESTIMONIALS_SYSTEM_PROMPT, "not json at all")
            .clear(SERVICES_SYSTEM_PROMPT)
            .reply(SERVICES_SYSTEM_PROMPT, r#"{"items": []}"#),
    );

    let result = generator(&provider)
        .generate_site_content(&green_thumb(), None)
        .await
        .unwrap();

    assert_eq!(
        result.failed_sections,
        vec!["testimonials", "services", "team"]
    );
    assert_eq!(result.data.metadata.failed_sections, result.failed_sections);
    assert!(result.data.testimonials.is_none());
    assert!(result.data.services.is_none());
    assert!(result.data.team.is_none());
    assert!(result.data.values.is_some());
    assert!(result.data.features.is_some());
    assert!(matches!(
        result.failures[2].reason,
        FailureReason::CallFailed { .. }
    ));
}

#[tokio::test]
async fn parse_failures_still_count_toward_usage() {
    let provider = Arc::new(
        ScriptedProvider::all_valid()
            .clear(VALUES_SYSTEM_PROMPT)
            .reply(VALUES_SYSTEM_PROMPT, "values are great")
            .clear(FEATURES_SYSTEM_PROMPT)
            .fail(FEATURES_SYSTEM_PROMPT, "refused"),
    );

    let result = generator(&provider)
        .generate_site_content(&green_thumb(), None)
        .await
        .unwrap();

    // The unparseable values response is billed; the errored features call is not.
    assert_eq!(result.total_calls, 7);
    assert_eq!(result.token_usage.prompt_tokens, 7 * PROMPT_TOKENS);
    assert_eq!(result.failed_sections, vec!["values", "features"]);
}

#[tokio::test]
async fn contact_fallback_is_deterministic() {
    let script = || {
        Arc::new(
            ScriptedProvider::all_valid()
                .clear(CONTACT_SYSTEM_PROMPT)
                .fail(CONTACT_SYSTEM_PROMPT, "timeout-ish"),
        )
    };

    let first = generator(&script())
        .generate_site_content(&green_thumb(), None)
        .await
        .unwrap();
    let second = generator(&script())
        .generate_site_content(&green_thumb(), None)
        .await
        .unwrap();

    assert_eq!(first.data.contact, ContactSection::fallback());
    assert_eq!(first.data.contact, second.data.contact);
    assert_eq!(
        serde_json::to_string(&first.data.contact).unwrap(),
        serde_json::to_string(&second.data.contact).unwrap()
    );
    assert_eq!(
        first.failed_sections,
        vec!["contact".to_string(), FailedUnit::ContactFallback.marker()]
    );
    assert_eq!(first.failed_sections[1], "contact-fallback-used");
}

#[tokio::test]
async fn unparseable_contact_also_falls_back() {
    let provider = Arc::new(
        ScriptedProvider::all_valid()
            .clear(CONTACT_SYSTEM_PROMPT)
            .reply(CONTACT_SYSTEM_PROMPT, "call us maybe"),
    );

    let result = generator(&provider)
        .generate_site_content(&green_thumb(), None)
        .await
        .unwrap();

    assert_eq!(result.data.contact.title, ContactSection::FALLBACK_TITLE);
    assert!(result
        .failed_sections
        .contains(&"contact-fallback-used".to_string()));
}

#[tokio::test]
async fn empty_contact_object_falls_back() {
    let provider = Arc::new(
        ScriptedProvider::all_valid()
            .clear(CONTACT_SYSTEM_PROMPT)
            .reply(CONTACT_SYSTEM_PROMPT, "{}"),
    );

    let result = generator(&provider)
        .generate_site_content(&green_thumb(), None)
        .await
        .unwrap();

    assert_eq!(result.data.contact, ContactSection::fallback());
    assert_eq!(
        result.failed_sections,
        vec!["contact".to_string(), "contact-fallback-used".to_string()]
    );
    assert_eq!(provider.calls_for(CONTACT_SYSTEM_PROMPT).len(), 1);
}

#[tokio::test]
async fn cost_follows_pricing_table() {
    let provider = Arc::new(ScriptedProvider::all_valid());
    let pricing = PricingTable {
        prompt_cents_per_million: 300.0,
        completion_cents_per_million: 1500.0,
    };

    let result = generator(&provider)
        .with_pricing(pricing)
        .generate_site_content(&green_thumb(), None)
        .await
        .unwrap();

    // (800 * 300 + 400 * 1500) / 1e6
    assert!((result.total_cost_cents - 0.84).abs() < 1e-9);
}

#[tokio::test]
async fn progress_events_trace_the_run() {
    let provider = Arc::new(ScriptedProvider::all_valid());
    let sink = Arc::new(MemoryProgressSink::new());

    generator(&provider)
        .with_progress(sink.clone())
        .generate_site_content(&green_thumb(), None)
        .await
        .unwrap();

    let events = sink.events();
    let types = sink.event_types();
    assert_eq!(types.len(), 11);
    assert_eq!(types[0], "generation_started");
    assert_eq!(types[1], "phase_started");
    assert_eq!(events[1].data["phase"], "foundation");
    assert_eq!(events[2].data["phase"], "sections");
    assert_eq!(
        types.iter().filter(|t| *t == "section_completed").count(),
        7
    );
    assert_eq!(types[10], "generation_completed");
    assert_eq!(events[10].data["total_calls"], 8);
    assert!(events.windows(2).all(|w| w[0].seq < w[1].seq));
    assert!(events.iter().all(|e| e.job == events[0].job));
}

#[tokio::test]
async fn failed_run_emits_generation_failed() {
    let provider = Arc::new(ScriptedProvider::new());
    let sink = Arc::new(MemoryProgressSink::new());

    let result = generator(&provider)
        .with_progress(sink.clone())
        .generate_site_content(&green_thumb(), None)
        .await;

    assert!(result.is_err());
    let events = sink.events();
    let last = events.last().unwrap();
    assert_eq!(last.event_type, "generation_failed");
    assert!(last.data["error"]
        .as_str()
        .unwrap()
        .starts_with("Site generation failed"));
}

#[tokio::test(start_paused = true)]
async fn sections_are_issued_concurrently() {
    let provider = Arc::new(ScriptedProvider::all_valid().with_delay(Duration::from_secs(1)));

    let result = generator(&provider)
        .generate_site_content(&green_thumb(), None)
        .await
        .unwrap();

    assert!(result.failed_sections.is_empty());
    assert_eq!(provider.max_in_flight(), 7);
    assert_eq!(provider.max_in_flight_for(ABOUT_SYSTEM_PROMPT), 1);
}

#[tokio::test]
async fn generator_can_be_reused_across_jobs() {
    let provider = Arc::new(
        ScriptedProvider::all_valid()
            .reply(FOUNDATION_SYSTEM_PROMPT, FOUNDATION_JSON)
            .reply(ABOUT_SYSTEM_PROMPT, ABOUT_JSON)
            .reply(CONTACT_SYSTEM_PROMPT, CONTACT_JSON),
    );
    let generator = generator(&provider);

    let first = generator
        .generate_site_content(&green_thumb(), None)
        .await
        .unwrap();
    let second = generator
        .generate_site_content(&green_thumb(), None)
        .await
        .unwrap();

    assert_eq!(first.total_calls, 8);
    // Optional sections are unscripted the second time; counters start fresh.
    assert_eq!(second.total_calls, 3);
    assert_eq!(
        second.failed_sections,
        vec!["testimonials", "values", "features", "services", "team"]
    );
}
