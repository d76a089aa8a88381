//! Persistence layer for the site content store

use crate::error::StorageError;
use crate::site::GeneratedSiteData;
use crate::store::{validate_site_id, SiteContentStore, SiteSummary, StoredSite};
use chrono::{SecondsFormat, Utc};
use std::path::Path;
use tracing::debug;

const SITE_KEY_PREFIX: &str = "site:";

fn sled_error(context: &str, err: sled::Error) -> StorageError {
    StorageError::IoError(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("{}: {}", context, err),
    ))
}

fn site_key(site_id: &str) -> String {
    format!("{}{}", SITE_KEY_PREFIX, site_id)
}

/// Sled-based implementation of SiteContentStore. Values are JSON documents.
pub struct SledSiteContentStore {
    db: sled::Db,
}

impl SledSiteContentStore {
    /// Open (or create) a store in the directory at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path).map_err(|e| sled_error("Failed to open sled database", e))?;
        Ok(Self { db })
    }

    fn decode(value: &[u8]) -> Result<StoredSite, StorageError> {
        serde_json::from_slice(value).map_err(|e| StorageError::Decode(e.to_string()))
    }
}

impl SiteContentStore for SledSiteContentStore {
    fn put(&self, site_id: &str, data: &GeneratedSiteData) -> Result<StoredSite, StorageError> {
        validate_site_id(site_id)?;
        let stored = StoredSite {
            site_id: site_id.to_string(),
            stored_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            data: data.clone(),
        };
        let value = serde_json::to_vec(&stored).map_err(|e| StorageError::Encode(e.to_string()))?;
        self.db
            .insert(site_key(site_id).as_bytes(), value)
            .map_err(|e| sled_error("Failed to put site", e))?;
        self.db
            .flush()
            .map_err(|e| sled_error("Failed to flush store", e))?;
        debug!(site_id, "Site content stored");
        Ok(stored)
    }

    fn get(&self, site_id: &str) -> Result<Option<StoredSite>, StorageError> {
        validate_site_id(site_id)?;
        match self
            .db
            .get(site_key(site_id).as_bytes())
            .map_err(|e| sled_error("Failed to get site", e))?
        {
            Some(value) => Ok(Some(Self::decode(&value)?)),
            None => Ok(None),
        }
    }

    fn list(&self) -> Result<Vec<SiteSummary>, StorageError> {
        let mut summaries = Vec::new();
        for item in self.db.scan_prefix(SITE_KEY_PREFIX.as_bytes()) {
            let (_, value) = item.map_err(|e| sled_error("Failed to iterate store", e))?;
            summaries.push(SiteSummary::from(&Self::decode(&value)?));
        }
        Ok(summaries)
    }

    fn delete(&self, site_id: &str) -> Result<(), StorageError> {
        validate_site_id(site_id)?;
        let removed = self
            .db
            .remove(site_key(site_id).as_bytes())
            .map_err(|e| sled_error("Failed to delete site", e))?;
        if removed.is_none() {
            return Err(StorageError::SiteNotFound(site_id.to_string()));
        }
        self.db
            .flush()
            .map_err(|e| sled_error("Failed to flush store", e))?;
        Ok(())
    }
}
