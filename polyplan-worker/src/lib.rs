//! Runs layout optimizations as background jobs.
//!
//! A single optimization is CPU-bound and can take longer than a typical request timeout,
//! so callers submit a request, receive a [`JobId`] and poll the [`JobStore`] for its status and result.

mod dispatcher;
mod ndjson;
mod store;

pub use dispatcher::{Dispatcher, run_job};
pub use ndjson::serve;
pub use store::{JobId, JobRecord, JobStatus, JobStore};
