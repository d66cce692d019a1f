//! Person profile types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TinderboxError};

/// A profile that users swipe on.
///
/// `like_count` is denormalized: it always equals the number of active
/// [`Like`](crate::Like) rows referencing this person. `admin_notified` flips
/// to true once a popularity alert has been delivered and never flips back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub age: u32,
    /// Ordered image URLs
    pub pictures: Vec<String>,
    pub location: String,
    pub like_count: i64,
    pub admin_notified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a person (seeding and admin entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    pub name: String,
    pub age: u32,
    pub pictures: Vec<String>,
    pub location: String,
}

impl NewPerson {
    pub fn new(
        name: impl Into<String>,
        age: u32,
        pictures: Vec<String>,
        location: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), age, pictures, location: location.into() }
    }

    /// Reject profiles that would violate the person invariants.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TinderboxError::Validation("name must not be empty".into()));
        }
        if self.age == 0 {
            return Err(TinderboxError::Validation("age must be a positive integer".into()));
        }
        if self.location.trim().is_empty() {
            return Err(TinderboxError::Validation("location must not be empty".into()));
        }
        Ok(())
    }
}

/// A person the user currently likes, with the time the like was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikedPerson {
    pub person: Person,
    pub liked_at: DateTime<Utc>,
}
