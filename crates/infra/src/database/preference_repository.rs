//! Like/dislike persistence using SQLite
//!
//! Every `apply` runs in a `BEGIN IMMEDIATE` transaction so the pair-state
//! read, the record insert, the opposing delete and the counter update are
//! serialized against other writers. The `UNIQUE (user_id, person_id)`
//! constraints remain the last line against duplicates.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use tinderbox_core::{
    duplicate_action, plan_transition, PairState, PreferenceRepository as PreferenceRepositoryPort,
};
use tinderbox_domain::{
    LikedPerson, PreferenceAction, PreferenceRecord, Result as DomainResult, TinderboxError,
};
use tokio::task;
use tracing::debug;

use super::manager::DbManager;
use super::person_repository::{map_person_row, millis_to_datetime, PERSON_COLUMNS};
use crate::errors::conversions::{map_join_error, map_sql_error};

/// SQLite-backed implementation of `PreferenceRepository`
pub struct SqlitePreferenceRepository {
    db: Arc<DbManager>,
}

impl SqlitePreferenceRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PreferenceRepositoryPort for SqlitePreferenceRepository {
    async fn apply(
        &self,
        user_id: i64,
        person_id: i64,
        action: PreferenceAction,
    ) -> DomainResult<PreferenceRecord> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<PreferenceRecord> {
            let mut conn = db.get_connection()?;
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(map_sql_error)?;

            let person_exists = tx
                .query_row("SELECT 1 FROM people WHERE id = ?1", params![person_id], |_| Ok(()))
                .optional()
                .map_err(map_sql_error)?
                .is_some();
            if !person_exists {
                return Err(TinderboxError::NotFound(format!("person {person_id}")));
            }

            let transition = plan_transition(action, read_pair_state(&tx, user_id, person_id)?)?;
            let now = Utc::now();

            tx.execute(
                &format!(
                    "INSERT INTO {} (user_id, person_id, created_at) VALUES (?1, ?2, ?3)",
                    table_for(transition.insert)
                ),
                params![user_id, person_id, now.timestamp_millis()],
            )
            .map_err(|err| match map_sql_error(err) {
                TinderboxError::DuplicateAction(_) => duplicate_action(action),
                other => other,
            })?;
            let record_id = tx.last_insert_rowid();

            if transition.remove_opposite {
                tx.execute(
                    &format!(
                        "DELETE FROM {} WHERE user_id = ?1 AND person_id = ?2",
                        table_for(action.opposite())
                    ),
                    params![user_id, person_id],
                )
                .map_err(map_sql_error)?;
            }

            if transition.like_count_delta != 0 {
                tx.execute(
                    "UPDATE people SET like_count = like_count + ?2, updated_at = ?3 WHERE id = ?1",
                    params![person_id, transition.like_count_delta, now.timestamp_millis()],
                )
                .map_err(map_sql_error)?;
            }

            tx.commit().map_err(map_sql_error)?;

            debug!(
                user_id,
                person_id,
                action = %action,
                delta = transition.like_count_delta,
                replaced = transition.remove_opposite,
                "preference transaction committed"
            );

            // Round-trip through millis so the returned record matches what is stored
            let created_at = millis_to_datetime(0, now.timestamp_millis()).map_err(map_sql_error)?;
            Ok(PreferenceRecord { id: record_id, user_id, person_id, created_at })
        })
        .await
        .map_err(map_join_error)?
    }

    async fn pair_state(&self, user_id: i64, person_id: i64) -> DomainResult<PairState> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<PairState> {
            let conn = db.get_connection()?;
            read_pair_state(&conn, user_id, person_id)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_liked(&self, user_id: i64) -> DomainResult<Vec<LikedPerson>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<LikedPerson>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {PERSON_COLUMNS}, l.created_at
                     FROM likes l
                     JOIN people p ON p.id = l.person_id
                     WHERE l.user_id = ?1
                     ORDER BY l.created_at DESC, l.id DESC"
                ))
                .map_err(map_sql_error)?;

            let liked = stmt
                .query_map(params![user_id], |row| {
                    Ok(LikedPerson {
                        person: map_person_row(row)?,
                        liked_at: millis_to_datetime(9, row.get(9)?)?,
                    })
                })
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            Ok(liked)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn table_for(action: PreferenceAction) -> &'static str {
    match action {
        PreferenceAction::Like => "likes",
        PreferenceAction::Dislike => "dislikes",
    }
}

fn read_pair_state(conn: &Connection, user_id: i64, person_id: i64) -> DomainResult<PairState> {
    conn.query_row(
        "SELECT
            EXISTS(SELECT 1 FROM likes WHERE user_id = ?1 AND person_id = ?2),
            EXISTS(SELECT 1 FROM dislikes WHERE user_id = ?1 AND person_id = ?2)",
        params![user_id, person_id],
        |row| Ok(PairState { has_like: row.get(0)?, has_dislike: row.get(1)? }),
    )
    .map_err(map_sql_error)
}
