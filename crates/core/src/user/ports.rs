//! Port interfaces for the external user directory
//!
//! Only identity is consumed: the ledger needs to know a user exists before
//! recording anything on their behalf.

use async_trait::async_trait;
use tinderbox_domain::Result;

/// Trait for user existence checks
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Whether a user with this ID exists
    async fn exists(&self, user_id: i64) -> Result<bool>;
}
