//! # Tinderbox Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite storage (pool, schema, person/preference/user repositories)
//! - Mail channels for popularity alerts (log and HTTP relay)
//! - Configuration loading
//! - The cron-driven popularity sweep
//!
//! ## Architecture
//! - Implements traits defined in `tinderbox-core`
//! - Contains all "impure" code (I/O, HTTP, timers)

pub mod config;
pub mod database;
pub mod errors;
pub mod notification;
pub mod scheduling;

// Re-export commonly used items
pub use database::*;
pub use errors::InfraError;
pub use notification::{build_channel, HttpMailChannel, LogMailChannel};
pub use scheduling::{PopularityScheduler, PopularitySchedulerConfig, SchedulerError};
