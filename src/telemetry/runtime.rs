//! Per-job event emission with sequence numbering.

use crate::telemetry::events::ProgressEvent;
use crate::telemetry::sinks::ProgressSink;
use crate::telemetry::types::new_job_id;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Stamps events for one generation job and hands them to the configured sink.
/// Without a sink every emit is a no-op.
pub struct ProgressRuntime {
    job_id: String,
    next_seq: AtomicU64,
    sink: Option<Arc<dyn ProgressSink>>,
}

impl ProgressRuntime {
    pub fn new(sink: Option<Arc<dyn ProgressSink>>) -> Self {
        Self::with_job_id(new_job_id(), sink)
    }

    pub fn with_job_id(job_id: impl Into<String>, sink: Option<Arc<dyn ProgressSink>>) -> Self {
        Self {
            job_id: job_id.into(),
            next_seq: AtomicU64::new(0),
            sink,
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn emit_event_best_effort<T: Serialize>(&self, event_type: &str, data: &T) {
        let Some(sink) = &self.sink else {
            return;
        };
        let data = match serde_json::to_value(data) {
            Ok(value) => value,
            Err(err) => {
                warn!(event_type, error = %err, "Failed to encode progress event");
                Value::Null
            }
        };
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        sink.emit(ProgressEvent::with_now(self.job_id.clone(), seq, event_type, data));
    }
}
