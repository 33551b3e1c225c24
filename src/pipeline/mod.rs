//! Sequential batch pipeline
//!
//! For every call identifier in the input file, in order:
//! - fetch the transcription
//! - classify the customer intent (skipped when the fetch failed)
//! - append a `CallRecord`
//!
//! Item-level failures stay inside their record; only input problems abort
//! the batch.

mod batch;
mod pipeline;
mod record;

pub use batch::CallIdBatch;
pub use pipeline::BatchPipeline;
pub use record::{BatchReport, BatchSummary, CallRecord, ItemFailure};
