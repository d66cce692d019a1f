//! Port interfaces for person profile storage

use async_trait::async_trait;
use tinderbox_domain::{NewPerson, Page, PageRequest, Person, Result};

/// Trait for person persistence and retrieval
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Get a person by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Person>>;

    /// Create a person with a zero like count and the notified flag unset
    async fn create(&self, person: NewPerson) -> Result<Person>;

    /// Delete a person; dependent likes and dislikes go with it.
    ///
    /// Returns false when no such person existed.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Count all persons
    async fn count(&self) -> Result<u64>;

    /// Newest-first page of persons, excluding every person the given user
    /// has an active like or dislike for.
    async fn list_recommended(
        &self,
        excluding_user: Option<i64>,
        page: PageRequest,
    ) -> Result<Page<Person>>;

    /// Persons with `like_count > threshold` that have not been notified yet
    async fn find_popular_unnotified(&self, threshold: i64) -> Result<Vec<Person>>;

    /// Set `admin_notified` for a person that has not been notified yet.
    ///
    /// Returns false when the flag was already set (or the person is gone).
    async fn mark_notified(&self, id: i64) -> Result<bool>;
}
