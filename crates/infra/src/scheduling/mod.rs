//! Scheduling infrastructure for the popularity sweep
//!
//! Explicit lifecycle (start/stop), tracked join handles, cancellation token
//! support, and timeouts around every asynchronous lifecycle step.

pub mod error;
pub mod popularity_scheduler;

pub use error::{SchedulerError, SchedulerResult};
pub use popularity_scheduler::{PopularityScheduler, PopularitySchedulerConfig, SweepJob};
