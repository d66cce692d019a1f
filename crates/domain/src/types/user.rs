//! User types
//!
//! Users are owned by an external directory; only the identity is consumed
//! here. The local copy exists so preference rows have something to reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User known to the local directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
