//! Site Content Store
//!
//! Persists assembled site content keyed by site id. Generation hands its
//! [`GeneratedSiteData`] here; the CLI reads it back for `show`, `list` and `delete`.

pub mod persistence;

pub use persistence::SledSiteContentStore;

use crate::error::StorageError;
use crate::site::{slugify, GeneratedSiteData};
use serde::{Deserialize, Serialize};

/// One stored generation result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredSite {
    pub site_id: String,
    /// RFC 3339 timestamp of the write
    pub stored_at: String,
    pub data: GeneratedSiteData,
}

/// Listing row; avoids handing whole documents to callers that only need a summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteSummary {
    pub site_id: String,
    pub site_name: String,
    pub stored_at: String,
    pub custom_pages: usize,
    pub failed_sections: Vec<String>,
}

impl From<&StoredSite> for SiteSummary {
    fn from(site: &StoredSite) -> Self {
        Self {
            site_id: site.site_id.clone(),
            site_name: site.data.site_name.clone(),
            stored_at: site.stored_at.clone(),
            custom_pages: site.data.custom_pages.as_ref().map_or(0, Vec::len),
            failed_sections: site.data.metadata.failed_sections.clone(),
        }
    }
}

/// Site content store interface
pub trait SiteContentStore {
    /// Insert or replace the content stored under `site_id`.
    fn put(&self, site_id: &str, data: &GeneratedSiteData) -> Result<StoredSite, StorageError>;
    fn get(&self, site_id: &str) -> Result<Option<StoredSite>, StorageError>;
    /// Every stored site, ordered by site id.
    fn list(&self) -> Result<Vec<SiteSummary>, StorageError>;
    /// Remove a site. Missing ids are an error.
    fn delete(&self, site_id: &str) -> Result<(), StorageError>;
}

const MAX_SITE_ID_LEN: usize = 128;

/// Site ids are lowercase ASCII slugs.
pub fn validate_site_id(site_id: &str) -> Result<(), StorageError> {
    let valid = !site_id.is_empty()
        && site_id.len() <= MAX_SITE_ID_LEN
        && site_id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !site_id.starts_with('-')
        && !site_id.ends_with('-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidSiteId(site_id.to_string()))
    }
}

/// Default id for a site: the slug of its name.
pub fn default_site_id(data: &GeneratedSiteData) -> String {
    let mut id = slugify(&data.site_name);
    id.truncate(MAX_SITE_ID_LEN);
    id.trim_end_matches('-').to_string()
}
