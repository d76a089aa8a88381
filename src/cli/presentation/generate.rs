//! Generate command presentation.

use crate::cli::presentation::shared::{
    format_failed_sections, format_section_heading, key_value_table, to_pretty_json,
};
use crate::generation::SiteGenerationResult;
use crate::telemetry::ProgressEvent;
use owo_colors::OwoColorize;
use serde_json::json;

pub fn format_generation_result_text(
    result: &SiteGenerationResult,
    site_id: Option<&str>,
    events: &[ProgressEvent],
) -> String {
    let data = &result.data;
    let mut out = format!("{}\n\n", format_section_heading("Site Generated"));
    let custom_pages = data
        .custom_pages
        .as_ref()
        .map(|pages| {
            pages
                .iter()
                .map(|p| p.page_type.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|pages| !pages.is_empty())
        .unwrap_or_else(|| "none".to_string());
    let rows = vec![
        ("Site name", data.site_name.clone()),
        ("Tagline", data.tagline.clone()),
        ("Primary color", data.branding.primary_color.clone()),
        (
            "Optional sections",
            format!("{} of 5", data.optional_section_count()),
        ),
        ("Custom pages", custom_pages),
        ("LLM calls", result.total_calls.to_string()),
        (
            "Tokens",
            format!(
                "{} ({} prompt / {} completion)",
                result.token_usage.total_tokens,
                result.token_usage.prompt_tokens,
                result.token_usage.completion_tokens
            ),
        ),
        ("Cost", format!("{:.4} cents", result.total_cost_cents)),
        ("Duration", format!("{} ms", data.metadata.duration_ms)),
        (
            "Stored as",
            site_id.map_or_else(|| "(not stored)".to_string(), str::to_string),
        ),
    ];
    out.push_str(&format!("{}\n", key_value_table(&rows)));

    if result.failed_sections.is_empty() {
        out.push_str(&format!("\n{}\n", "All sections generated.".green()));
    } else {
        out.push('\n');
        out.push_str(&format_failed_sections(&result.failed_sections));
    }

    if !events.is_empty() {
        out.push_str(&format!("\n{}\n\n", format_section_heading("Progress events")));
        for event in events {
            out.push_str(&format!(
                "  {:>3} {:<24} {}\n",
                event.seq, event.event_type, event.data
            ));
        }
    }
    out
}

pub fn format_generation_result_json(
    result: &SiteGenerationResult,
    site_id: Option<&str>,
    events: &[ProgressEvent],
) -> String {
    let mut out = json!({
        "site_id": site_id,
        "result": result,
    });
    if !events.is_empty() {
        out["events"] = json!(events);
    }
    to_pretty_json(&out)
}
