//! Sled-backed site content store.

use crate::integration::test_utils::{ABOUT_JSON, FOUNDATION_JSON};
use sitegen::error::StorageError;
use sitegen::generation::parse::{parse_about_response, parse_foundation_response};
use sitegen::site::{ContactSection, GeneratedSiteData, GenerationMetadata};
use sitegen::store::{default_site_id, SiteContentStore, SledSiteContentStore};
use tempfile::TempDir;

fn site(failed: &[&str]) -> GeneratedSiteData {
    GeneratedSiteData::from_foundation(
        parse_foundation_response(FOUNDATION_JSON).unwrap(),
        parse_about_response(ABOUT_JSON).unwrap(),
        ContactSection::fallback(),
        GenerationMetadata {
            generated_at: "2026-10-18T12:00:00.000Z".to_string(),
            duration_ms: 4200,
            failed_sections: failed.iter().map(|s| s.to_string()).collect(),
            model: Some("scripted-model".to_string()),
        },
    )
}

#[test]
fn put_then_get_returns_the_same_content() {
    let dir = TempDir::new().unwrap();
    let store = SledSiteContentStore::new(dir.path().join("store")).unwrap();
    let data = site(&[]);

    let stored = store.put("green-thumb-gardens", &data).unwrap();
    let loaded = store.get("green-thumb-gardens").unwrap().unwrap();

    assert_eq!(stored.site_id, "green-thumb-gardens");
    assert_eq!(loaded.data, data);
    assert_eq!(loaded.stored_at, stored.stored_at);
    assert!(store.get("unknown-site").unwrap().is_none());
}

#[test]
fn put_overwrites_existing_site() {
    let dir = TempDir::new().unwrap();
    let store = SledSiteContentStore::new(dir.path()).unwrap();

    store.put("gtg", &site(&[])).unwrap();
    store.put("gtg", &site(&["team"])).unwrap();

    let loaded = store.get("gtg").unwrap().unwrap();
    assert_eq!(loaded.data.metadata.failed_sections, vec!["team"]);
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn list_summarizes_stored_sites() {
    let dir = TempDir::new().unwrap();
    let store = SledSiteContentStore::new(dir.path()).unwrap();
    store.put("alpha", &site(&[])).unwrap();
    store.put("beta", &site(&["values", "contact-fallback-used"])).unwrap();

    let summaries = store.list().unwrap();

    assert_eq!(summaries.len(), 2);
    let ids: Vec<&str> = summaries.iter().map(|s| s.site_id.as_str()).collect();
    assert_eq!(ids, vec!["alpha", "beta"]);
    assert_eq!(summaries[0].site_name, "Green Thumb Gardens");
    assert_eq!(summaries[0].custom_pages, 0);
    assert_eq!(summaries[1].failed_sections.len(), 2);
}

#[test]
fn delete_removes_site_and_rejects_unknown_ids() {
    let dir = TempDir::new().unwrap();
    let store = SledSiteContentStore::new(dir.path()).unwrap();
    store.put("gtg", &site(&[])).unwrap();

    store.delete("gtg").unwrap();

    assert!(store.get("gtg").unwrap().is_none());
    assert!(matches!(
        store.delete("gtg"),
        Err(StorageError::SiteNotFound(id)) if id == "gtg"
    ));
}

#[test]
fn invalid_site_ids_are_rejected() {
    let dir = TempDir::new().unwrap();
    let store = SledSiteContentStore::new(dir.path()).unwrap();

    for id in ["", "Green Thumb", "../etc", "trailing-"] {
        assert!(matches!(
            store.put(id, &site(&[])),
            Err(StorageError::InvalidSiteId(_))
        ));
    }
}

#[test]
fn content_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store");
    let data = site(&["team"]);
    {
        let store = SledSiteContentStore::new(&path).unwrap();
        store.put(&default_site_id(&data), &data).unwrap();
    }

    let reopened = SledSiteContentStore::new(&path).unwrap();
    let loaded = reopened.get("green-thumb-gardens").unwrap().unwrap();
    assert_eq!(loaded.data, data);
}
