//! Preference ledger: likes, dislikes, and the per-person like counter

pub mod ledger;
pub mod ports;
pub mod rules;

pub use ledger::PreferenceLedger;
