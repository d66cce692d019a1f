//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Tinderbox
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum TinderboxError {
    /// The like or dislike being recorded already exists for the pair.
    #[error("Duplicate action: {0}")]
    DuplicateAction(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Sending a popularity notification failed. Never surfaced to API
    /// clients; the sweep retries on its next run.
    #[error("Notification delivery failed: {0}")]
    NotificationDelivery(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TinderboxError {
    /// Stable label suitable for structured logs and API error bodies.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DuplicateAction(_) => "duplicate_action",
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation_error",
            Self::NotificationDelivery(_) => "notification_delivery_failure",
            Self::Database(_) => "database",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether the caller can fix the problem by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::DuplicateAction(_) | Self::NotFound(_) | Self::Validation(_))
    }
}

/// Result type alias for Tinderbox operations
pub type Result<T> = std::result::Result<T, TinderboxError>;
