//! Stored site presentation: show and list.

use crate::cli::presentation::shared::{
    format_failed_sections, format_section_heading, key_value_table, to_pretty_json,
};
use crate::store::{SiteSummary, StoredSite};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::json;

pub fn format_site_text(site: &StoredSite) -> String {
    let data = &site.data;
    let mut out = format!("{}\n\n", format_section_heading(&data.site_name));
    let rows = vec![
        ("Site id", site.site_id.clone()),
        ("Tagline", data.tagline.clone()),
        ("Generated", data.metadata.generated_at.clone()),
        ("Stored", site.stored_at.clone()),
        (
            "Model",
            data.metadata.model.clone().unwrap_or_else(|| "-".to_string()),
        ),
        (
            "Colors",
            format!(
                "{} / {}",
                data.branding.primary_color, data.branding.secondary_color
            ),
        ),
    ];
    out.push_str(&format!("{}\n\n", key_value_table(&rows)));

    out.push_str(&format!("{}\n", format_section_heading("Hero")));
    out.push_str(&format!("  {}\n", data.hero.headline));
    if !data.hero.subheadline.is_empty() {
        out.push_str(&format!("  {}\n", data.hero.subheadline));
    }
    out.push('\n');

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Section", "Title", "Entries"]);
    table.add_row(vec!["about".to_string(), data.about.title.clone(), "-".to_string()]);
    table.add_row(vec!["contact".to_string(), data.contact.title.clone(), "-".to_string()]);
    if let Some(section) = &data.testimonials {
        table.add_row(vec![
            "testimonials".to_string(),
            section.title.clone(),
            section.items.len().to_string(),
        ]);
    }
    if let Some(section) = &data.values {
        table.add_row(vec![
            "values".to_string(),
            section.title.clone(),
            section.items.len().to_string(),
        ]);
    }
    if let Some(section) = &data.features {
        table.add_row(vec![
            "features".to_string(),
            section.title.clone(),
            section.items.len().to_string(),
        ]);
    }
    if let Some(section) = &data.services {
        table.add_row(vec![
            "services".to_string(),
            section.title.clone(),
            section.items.len().to_string(),
        ]);
    }
    if let Some(section) = &data.team {
        table.add_row(vec![
            "team".to_string(),
            section.title.clone(),
            section.members.len().to_string(),
        ]);
    }
    for page in data.custom_pages.iter().flatten() {
        table.add_row(vec![
            format!("page:{}", page.slug),
            page.title.clone(),
            page.content.items.len().to_string(),
        ]);
    }
    out.push_str(&format!("{}\n{}\n", format_section_heading("Sections"), table));

    let failed = format_failed_sections(&data.metadata.failed_sections);
    if !failed.is_empty() {
        out.push('\n');
        out.push_str(&failed);
    }
    out
}

pub fn format_site_json(site: &StoredSite) -> String {
    to_pretty_json(site)
}

pub fn format_site_list_text(sites: &[SiteSummary]) -> String {
    if sites.is_empty() {
        return "No stored sites.\n\nUse 'sitegen generate' to create one.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Site id", "Name", "Stored", "Custom pages", "Needs review"]);
    for site in sites {
        let review = if site.failed_sections.is_empty() {
            "no".to_string()
        } else {
            site.failed_sections.join(", ")
        };
        table.add_row(vec![
            site.site_id.clone(),
            site.site_name.clone(),
            site.stored_at.clone(),
            site.custom_pages.to_string(),
            review,
        ]);
    }
    format!("{}\n\nTotal: {} site(s)\n", table, sites.len())
}

pub fn format_site_list_json(sites: &[SiteSummary]) -> String {
    to_pretty_json(&json!({ "sites": sites, "total": sites.len() }))
}
