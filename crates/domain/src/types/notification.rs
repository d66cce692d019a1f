//! Popularity notification types

use serde::{Deserialize, Serialize};

use super::person::Person;
use crate::constants::POPULAR_ALERT_SUBJECT_PREFIX;

/// Summary of a person who crossed the popularity threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularPersonAlert {
    pub person_id: i64,
    pub name: String,
    pub like_count: i64,
    pub location: String,
}

impl PopularPersonAlert {
    pub fn subject(&self) -> String {
        format!("{POPULAR_ALERT_SUBJECT_PREFIX}{}", self.name)
    }

    /// One-line description, e.g. `Emma Watson (51 likes)`.
    pub fn headline(&self) -> String {
        format!("{} ({} likes)", self.name, self.like_count)
    }

    /// Plain-text message body.
    pub fn body(&self) -> String {
        format!(
            "{} has become popular.\n\nPerson ID: {}\nLocation: {}\nLikes: {}\n",
            self.headline(),
            self.person_id,
            self.location,
            self.like_count
        )
    }
}

impl From<&Person> for PopularPersonAlert {
    fn from(person: &Person) -> Self {
        Self {
            person_id: person.id,
            name: person.name.clone(),
            like_count: person.like_count,
            location: person.location.clone(),
        }
    }
}

/// Outcome of one notifier sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Persons above the threshold and not yet notified when the sweep began
    pub eligible: usize,
    /// Persons notified and marked during this sweep
    pub notified: Vec<i64>,
    /// Persons whose delivery failed; left unmarked for the next sweep
    pub failed: Vec<i64>,
}

impl SweepReport {
    pub fn notified_count(&self) -> usize {
        self.notified.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}
