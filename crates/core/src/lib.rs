//! # Tinderbox Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for storage and notification delivery
//! - The preference ledger (like/dislike state transitions)
//! - The popularity notifier (idempotent threshold sweep)
//!
//! ## Architecture Principles
//! - Only depends on `tinderbox-domain`
//! - No database, HTTP, or mail code
//! - All external dependencies via traits

pub mod people;
pub mod popularity;
pub mod preferences;
pub mod user;

pub use people::ports::PersonRepository;
pub use popularity::ports::NotificationChannel;
pub use popularity::PopularityNotifier;
pub use preferences::ports::PreferenceRepository;
pub use preferences::rules::{duplicate_action, plan_transition, PairState, Transition};
pub use preferences::PreferenceLedger;
pub use user::ports::UserDirectory;
