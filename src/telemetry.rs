//! Telemetry domain: job progress events and the sinks that receive them.

mod types;

pub mod events;
pub mod runtime;
pub mod sinks;

pub use events::{
    CustomPageEventData, GenerationCompletedData, GenerationFailedData, GenerationStartedData,
    PhaseStartedData, ProgressEvent, SectionEventData,
};
pub use runtime::ProgressRuntime;
pub use sinks::{MemoryProgressSink, ProgressSink, TracingProgressSink};
pub use types::{new_job_id, now_millis};
