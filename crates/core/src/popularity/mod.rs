//! Popularity notifier

pub mod notifier;
pub mod ports;

pub use notifier::PopularityNotifier;
