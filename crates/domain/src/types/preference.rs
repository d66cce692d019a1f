//! Like and dislike records
//!
//! Both record kinds share a shape: one row per `(user_id, person_id)` pair,
//! created by the matching action and deleted when the user reverses it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_domain_enum_conversions;

/// A swipe direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceAction {
    Like,
    Dislike,
}

impl_domain_enum_conversions!(PreferenceAction {
    Like => "like",
    Dislike => "dislike",
});

impl PreferenceAction {
    /// The action whose record gets removed when this one is recorded.
    pub fn opposite(self) -> Self {
        match self {
            Self::Like => Self::Dislike,
            Self::Dislike => Self::Like,
        }
    }

    /// Past-tense verb used in user-facing messages.
    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Like => "liked",
            Self::Dislike => "disliked",
        }
    }
}

/// An active record of either kind, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub id: i64,
    pub user_id: i64,
    pub person_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Active like of a person by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub id: i64,
    pub user_id: i64,
    pub person_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Active dislike of a person by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dislike {
    pub id: i64,
    pub user_id: i64,
    pub person_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<PreferenceRecord> for Like {
    fn from(record: PreferenceRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            person_id: record.person_id,
            created_at: record.created_at,
        }
    }
}

impl From<PreferenceRecord> for Dislike {
    fn from(record: PreferenceRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            person_id: record.person_id,
            created_at: record.created_at,
        }
    }
}
