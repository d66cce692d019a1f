//! # Tinderbox API
//!
//! HTTP application layer and process wiring.
//!
//! This crate contains:
//! - The axum router for `/api/v1`
//! - Application context (dependency injection)
//! - Logging setup shared by every subcommand
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - The `tinderbox` binary lives in `main.rs`

pub mod context;
pub mod http;
pub mod utils;

pub use context::AppContext;
pub use http::router;
