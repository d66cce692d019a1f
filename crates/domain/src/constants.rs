//! Application constants
//!
//! Centralized location for domain-level constants used throughout the
//! application.

// Popularity notifier
pub const DEFAULT_POPULAR_THRESHOLD: i64 = 50;
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
pub const POPULAR_ALERT_SUBJECT_PREFIX: &str = "Popular Person Alert - ";

// Hourly, at minute zero (seconds-resolution cron)
pub const DEFAULT_SWEEP_CRON: &str = "0 0 * * * *";

// Pagination
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 10;
pub const MAX_PER_PAGE: u32 = 100;

// HTTP
pub const API_PREFIX: &str = "/api/v1";
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8080;
