//! Shared telemetry helpers: timestamps and job id generation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static JOB_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Current time as milliseconds since Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Generate a unique generation job id.
pub fn new_job_id() -> String {
    let ts = now_millis();
    let pid = std::process::id();
    let seq = JOB_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("gen-{ts}-{pid}-{seq}")
}
