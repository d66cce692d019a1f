//! Like/dislike state transitions
//!
//! A user holds at most one record per person: a like, a dislike, or nothing.
//! Recording an action that already exists is rejected. Recording the other
//! action replaces the opposing record. Only likes count toward a person's
//! `like_count`, so the counter moves by +1 on every like and by -1 only when
//! a dislike replaces a like.

use serde::{Deserialize, Serialize};
use tinderbox_domain::{PreferenceAction, Result, TinderboxError};

/// Active records for one `(user, person)` pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairState {
    pub has_like: bool,
    pub has_dislike: bool,
}

impl PairState {
    pub fn has(&self, action: PreferenceAction) -> bool {
        match action {
            PreferenceAction::Like => self.has_like,
            PreferenceAction::Dislike => self.has_dislike,
        }
    }
}

/// Writes required to record an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Record to insert
    pub insert: PreferenceAction,
    /// Whether the opposing record exists and must be deleted
    pub remove_opposite: bool,
    /// Change to apply to the person's `like_count`
    pub like_count_delta: i64,
}

/// Plan the writes for `action` given the pair's current records.
///
/// Fails with `DuplicateAction` when the same record already exists.
pub fn plan_transition(action: PreferenceAction, state: PairState) -> Result<Transition> {
    if state.has(action) {
        return Err(duplicate_action(action));
    }

    let remove_opposite = state.has(action.opposite());
    let like_count_delta = match action {
        PreferenceAction::Like => 1,
        PreferenceAction::Dislike if remove_opposite => -1,
        PreferenceAction::Dislike => 0,
    };

    Ok(Transition { insert: action, remove_opposite, like_count_delta })
}

/// The error returned when a user repeats an action.
pub fn duplicate_action(action: PreferenceAction) -> TinderboxError {
    TinderboxError::DuplicateAction(format!("You have already {} this person", action.past_tense()))
}
