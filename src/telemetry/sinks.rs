//! Progress sinks.

use crate::telemetry::events::ProgressEvent;
use parking_lot::Mutex;
use tracing::info;

/// Receives job progress events. Emission is best-effort: sinks must not block the
/// pipeline and have no way to fail it.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// Forwards events to `tracing` under the `sitegen::progress` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgressSink;

impl ProgressSink for TracingProgressSink {
    fn emit(&self, event: ProgressEvent) {
        info!(
            target: "sitegen::progress",
            job = %event.job,
            seq = event.seq,
            event_type = %event.event_type,
            data = %event.data,
            "progress"
        );
    }
}

/// Retains every event in memory.
#[derive(Debug, Default)]
pub struct MemoryProgressSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl MemoryProgressSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().clone()
    }

    pub fn event_types(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .map(|e| e.event_type.clone())
            .collect()
    }
}

impl ProgressSink for MemoryProgressSink {
    fn emit(&self, event: ProgressEvent) {
        self.events.lock().push(event);
    }
}
