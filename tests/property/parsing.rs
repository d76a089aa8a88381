//! Property-based tests for model output parsing

use proptest::prelude::*;
use sitegen::generation::custom_pages::{
    build_faq_fallback, faq_preserves_source, select_recommended_pages,
};
use sitegen::generation::parse::{
    normalize_hex_color, parse_about_response, parse_contact_response,
    parse_custom_page_response, parse_foundation_response, parse_services_response,
    parse_team_response, parse_testimonials_response,
};
use sitegen::site::{BusinessInfo, FaqEntry, RecommendedPage};

/// Parsers never panic, whatever the model sends back
#[test]
fn test_parsers_tolerate_arbitrary_text() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&any::<String>(), |raw| {
            let _ = parse_foundation_response(&raw);
            let _ = parse_about_response(&raw);
            let _ = parse_contact_response(&raw);
            let _ = parse_services_response(&raw);
            let _ = parse_team_response(&raw);
            let _ = parse_testimonials_response(&raw);
            let _ = parse_custom_page_response(&raw, "events", "Events");
            Ok(())
        })
        .unwrap();
}

/// Prose and code fences around a valid object do not change the parse
#[test]
fn test_about_parse_ignores_surrounding_prose() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &("[a-zA-Z .,!]{0,40}", "[a-zA-Z .,!]{0,40}", "[a-zA-Z][a-zA-Z ]{0,30}"),
            |(before, after, content)| {
                let body = serde_json::json!({ "title": "About", "content": content }).to_string();
                let wrapped = format!("{}\n```json\n{}\n```\n{}", before, body, after);

                let direct = parse_about_response(&body);
                let from_wrapped = parse_about_response(&wrapped);

                prop_assert!(direct.is_some());
                prop_assert_eq!(direct, from_wrapped);
                Ok(())
            },
        )
        .unwrap();
}

/// Valid colors normalize to lowercase #rrggbb; normalization is idempotent
#[test]
fn test_hex_color_normalization() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&"#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})", |input| {
            let normalized = normalize_hex_color(&input).unwrap();

            prop_assert_eq!(normalized.len(), 7);
            prop_assert!(normalized.starts_with('#'));
            prop_assert_eq!(normalized.to_ascii_lowercase(), normalized.clone());
            let again = normalize_hex_color(&normalized);
            prop_assert_eq!(again, Some(normalized));
            Ok(())
        })
        .unwrap();
}

fn faq_strategy() -> impl Strategy<Value = Vec<FaqEntry>> {
    prop::collection::vec(("[A-Za-z ?]{1,20}", "[A-Za-z .]{1,30}"), 1..6).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(question, answer)| FaqEntry { question, answer })
            .collect()
    })
}

/// Any permutation of the source pairs is preserved; any edited answer is not
#[test]
fn test_faq_preservation_is_order_insensitive() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let info = BusinessInfo::new("Green Thumb Gardens", "garden center");

    runner
        .run(&(faq_strategy(), any::<prop::sample::Index>()), |(faq, index)| {
            let mut page = build_faq_fallback(&info, &faq);
            prop_assert!(faq_preserves_source(&page, &faq));

            page.content.items.reverse();
            prop_assert!(faq_preserves_source(&page, &faq));

            let idx = index.index(page.content.items.len());
            page.content.items[idx].description.push_str(" (updated)");
            prop_assert!(!faq_preserves_source(&page, &faq));
            Ok(())
        })
        .unwrap();
}

/// Selection never exceeds the cap and never returns a duplicate type
#[test]
fn test_recommended_page_selection_bounds() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let types = prop::collection::vec(
        prop::sample::select(vec![
            "about", "events", "Events", "workshops", "careers", "gallery", "faq", "classes",
        ]),
        0..12,
    );

    runner
        .run(&(types, 0usize..5), |(types, cap)| {
            let pages: Vec<RecommendedPage> = types
                .iter()
                .map(|t| RecommendedPage {
                    page_type: t.to_string(),
                    title: None,
                    reason: None,
                })
                .collect();

            let selected = select_recommended_pages(&pages, cap);

            prop_assert!(selected.len() <= cap);
            let mut keys: Vec<String> = selected
                .iter()
                .map(|p| p.page_type.to_ascii_lowercase())
                .collect();
            prop_assert!(!keys.iter().any(|k| k == "about" || k == "faq"));
            keys.sort();
            keys.dedup();
            prop_assert_eq!(keys.len(), selected.len());
            Ok(())
        })
        .unwrap();
}
