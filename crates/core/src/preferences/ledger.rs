//! Preference ledger service - core business logic

use std::sync::Arc;

use tinderbox_domain::{
    Dislike, Like, LikedPerson, Page, PageRequest, Person, PreferenceAction, PreferenceRecord,
    Result, TinderboxError,
};
use tracing::{debug, info};

use super::ports::PreferenceRepository;
use crate::people::ports::PersonRepository;
use crate::user::ports::UserDirectory;

/// Records likes and dislikes and serves the lists derived from them.
pub struct PreferenceLedger {
    people: Arc<dyn PersonRepository>,
    preferences: Arc<dyn PreferenceRepository>,
    users: Arc<dyn UserDirectory>,
}

impl PreferenceLedger {
    /// Create a new ledger over the given ports
    pub fn new(
        people: Arc<dyn PersonRepository>,
        preferences: Arc<dyn PreferenceRepository>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self { people, preferences, users }
    }

    /// Like a person.
    ///
    /// Increments the person's like count and drops an existing dislike by the
    /// same user. Fails with `DuplicateAction` if the like already exists.
    pub async fn record_like(&self, user_id: i64, person_id: i64) -> Result<Like> {
        self.record(user_id, person_id, PreferenceAction::Like).await.map(Like::from)
    }

    /// Dislike a person.
    ///
    /// Drops an existing like by the same user and reverses its increment.
    /// The notified flag is left alone. Fails with `DuplicateAction` if the
    /// dislike already exists.
    pub async fn record_dislike(&self, user_id: i64, person_id: i64) -> Result<Dislike> {
        self.record(user_id, person_id, PreferenceAction::Dislike).await.map(Dislike::from)
    }

    /// Newest-first page of persons the user has neither liked nor disliked.
    ///
    /// With no user every person is eligible.
    pub async fn list_recommended(
        &self,
        user_id: Option<i64>,
        page: PageRequest,
    ) -> Result<Page<Person>> {
        self.people.list_recommended(user_id, page).await
    }

    /// Persons the user actively likes, newest like first.
    pub async fn list_liked(&self, user_id: i64) -> Result<Vec<LikedPerson>> {
        self.ensure_user(user_id).await?;
        self.preferences.list_liked(user_id).await
    }

    async fn record(
        &self,
        user_id: i64,
        person_id: i64,
        action: PreferenceAction,
    ) -> Result<PreferenceRecord> {
        self.ensure_user(user_id).await?;
        self.ensure_person(person_id).await?;

        match self.preferences.apply(user_id, person_id, action).await {
            Ok(record) => {
                info!(user_id, person_id, action = %action, record_id = record.id, "preference recorded");
                Ok(record)
            }
            Err(err @ TinderboxError::DuplicateAction(_)) => {
                debug!(user_id, person_id, action = %action, "duplicate preference rejected");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    async fn ensure_user(&self, user_id: i64) -> Result<()> {
        if self.users.exists(user_id).await? {
            Ok(())
        } else {
            Err(TinderboxError::Validation("The selected user id is invalid.".into()))
        }
    }

    async fn ensure_person(&self, person_id: i64) -> Result<()> {
        match self.people.find_by_id(person_id).await? {
            Some(_) => Ok(()),
            None => Err(TinderboxError::NotFound(format!("person {person_id}"))),
        }
    }
}
