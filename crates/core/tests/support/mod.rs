//! Shared test helpers for `tinderbox-core` integration tests.
//!
//! In-memory fakes for every core port so ledger and notifier tests can focus
//! on behaviour instead of storage.
#![allow(dead_code)]

pub mod channels;
pub mod repositories;

pub use channels::RecordingChannel;
pub use repositories::InMemoryStore;
