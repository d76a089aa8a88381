//! Event schema for generation progress.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressEvent {
    pub ts: String,
    pub job: String,
    pub seq: u64,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: Value,
}

impl ProgressEvent {
    pub fn with_now(job: impl Into<String>, seq: u64, event_type: impl Into<String>, data: Value) -> Self {
        Self {
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            job: job.into(),
            seq,
            event_type: event_type.into(),
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationStartedData {
    pub business_name: String,
    pub has_scraped_context: bool,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseStartedData {
    pub phase: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionEventData {
    pub section: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomPageEventData {
    pub page_type: String,
    /// True when the page was built from scraped data instead of the model's output
    #[serde(default)]
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationCompletedData {
    pub duration_ms: u64,
    pub total_calls: u32,
    pub total_tokens: u32,
    pub failed_sections: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationFailedData {
    pub error: String,
}
