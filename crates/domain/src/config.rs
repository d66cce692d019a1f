//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ADMIN_EMAIL, DEFAULT_POPULAR_THRESHOLD, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_SWEEP_CRON,
};
use crate::impl_domain_enum_conversions;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: DEFAULT_SERVER_HOST.to_string(), port: DEFAULT_SERVER_PORT }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "tinderbox.db".to_string(), pool_size: 8, busy_timeout_ms: 5_000 }
    }
}

/// Popularity notifier configuration
///
/// A person is eligible once `like_count > threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    pub threshold: i64,
    /// Address that receives popularity alerts
    pub recipient: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self { threshold: DEFAULT_POPULAR_THRESHOLD, recipient: DEFAULT_ADMIN_EMAIL.to_string() }
    }
}

/// How popularity alerts leave the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailDriver {
    /// Write rendered messages to the log
    #[default]
    Log,
    /// POST messages to an HTTP mail relay
    Http,
}

impl_domain_enum_conversions!(MailDriver {
    Log => "log",
    Http => "http",
});

/// Mail delivery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub driver: MailDriver,
    pub from: String,
    /// Endpoint for the `http` driver
    pub relay_url: Option<String>,
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            driver: MailDriver::Log,
            from: "noreply@tinderbox.local".to_string(),
            relay_url: None,
            api_token: None,
            timeout_secs: 10,
        }
    }
}

/// Popularity sweep scheduling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub enabled: bool,
    /// Six-field cron expression (seconds first)
    pub cron_expression: String,
    pub job_timeout_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cron_expression: DEFAULT_SWEEP_CRON.to_string(),
            job_timeout_secs: 300,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}
