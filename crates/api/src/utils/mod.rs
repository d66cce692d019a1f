//! Shared helpers for the binary and the HTTP layer

pub mod logging;

pub use logging::{error_label, init_tracing, log_sweep_outcome};
