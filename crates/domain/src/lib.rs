//! # Tinderbox Domain
//!
//! Business domain types and models for Tinderbox.
//!
//! This crate contains:
//! - Domain data types (Person, Like, Dislike, pages, sweep reports)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Tinderbox crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
