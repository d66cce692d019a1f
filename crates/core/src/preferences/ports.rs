//! Port interfaces for like/dislike storage

use async_trait::async_trait;
use tinderbox_domain::{LikedPerson, PreferenceAction, PreferenceRecord, Result};

use super::rules::PairState;

/// Trait for preference persistence
///
/// Implementations own atomicity: reading the pair state, planning the
/// transition with [`plan_transition`](super::rules::plan_transition), and
/// writing the new record, the opposing delete, and the counter change must
/// happen in one storage transaction. The `(user_id, person_id)` uniqueness
/// of each record kind must be enforced by storage so a racing duplicate fails
/// with `DuplicateAction` instead of double counting.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Record `action` by `user_id` on `person_id` and return the new record.
    async fn apply(
        &self,
        user_id: i64,
        person_id: i64,
        action: PreferenceAction,
    ) -> Result<PreferenceRecord>;

    /// Which records currently exist for the pair
    async fn pair_state(&self, user_id: i64, person_id: i64) -> Result<PairState>;

    /// Persons the user actively likes, newest like first
    async fn list_liked(&self, user_id: i64) -> Result<Vec<LikedPerson>>;
}
