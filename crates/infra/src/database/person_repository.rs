//! Person repository implementation using SQLite
//!
//! Pictures are stored as a JSON array in a TEXT column; timestamps as unix
//! epoch milliseconds.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use tinderbox_core::PersonRepository as PersonRepositoryPort;
use tinderbox_domain::{NewPerson, Page, PageRequest, Person, Result as DomainResult};
use tokio::task;
use tracing::debug;

use super::manager::DbManager;
use crate::errors::conversions::{map_join_error, map_sql_error};

/// Column list matching [`map_person_row`]
pub(crate) const PERSON_COLUMNS: &str =
    "p.id, p.name, p.age, p.pictures, p.location, p.like_count, p.admin_notified, p.created_at, p.updated_at";

// Persons the user has an active like or dislike for. NULL user excludes nothing.
const RECOMMENDED_FILTER: &str = "?1 IS NULL OR p.id NOT IN (
        SELECT person_id FROM likes WHERE user_id = ?1
        UNION
        SELECT person_id FROM dislikes WHERE user_id = ?1
    )";

/// SQLite-backed implementation of `PersonRepository`
pub struct SqlitePersonRepository {
    db: Arc<DbManager>,
}

impl SqlitePersonRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PersonRepositoryPort for SqlitePersonRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Person>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<Person>> {
            let conn = db.get_connection()?;
            conn.query_row(
                &format!("SELECT {PERSON_COLUMNS} FROM people p WHERE p.id = ?1"),
                params![id],
                map_person_row,
            )
            .optional()
            .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn create(&self, person: NewPerson) -> DomainResult<Person> {
        person.validate()?;
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Person> {
            let conn = db.get_connection()?;
            let now = Utc::now().timestamp_millis();
            let pictures = encode_pictures(&person.pictures)?;

            conn.execute(
                "INSERT INTO people (name, age, pictures, location, like_count, admin_notified, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, 0, 0, ?5, ?5)",
                params![person.name, person.age, pictures, person.location, now],
            )
            .map_err(map_sql_error)?;

            let id = conn.last_insert_rowid();
            debug!(person_id = id, "person created");

            conn.query_row(
                &format!("SELECT {PERSON_COLUMNS} FROM people p WHERE p.id = ?1"),
                params![id],
                map_person_row,
            )
            .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete(&self, id: i64) -> DomainResult<bool> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<bool> {
            let conn = db.get_connection()?;
            let removed =
                conn.execute("DELETE FROM people WHERE id = ?1", params![id]).map_err(map_sql_error)?;
            Ok(removed > 0)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn count(&self) -> DomainResult<u64> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<u64> {
            let conn = db.get_connection()?;
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM people", [], |row| row.get(0))
                .map_err(map_sql_error)?;
            Ok(count_to_u64(count))
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_recommended(
        &self,
        excluding_user: Option<i64>,
        page: PageRequest,
    ) -> DomainResult<Page<Person>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Page<Person>> {
            let conn = db.get_connection()?;

            let total: i64 = conn
                .query_row(
                    &format!("SELECT COUNT(*) FROM people p WHERE {RECOMMENDED_FILTER}"),
                    params![excluding_user],
                    |row| row.get(0),
                )
                .map_err(map_sql_error)?;

            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {PERSON_COLUMNS} FROM people p
                     WHERE {RECOMMENDED_FILTER}
                     ORDER BY p.created_at DESC, p.id DESC
                     LIMIT ?2 OFFSET ?3"
                ))
                .map_err(map_sql_error)?;

            let items = stmt
                .query_map(params![excluding_user, page.limit(), page.offset()], map_person_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;

            Ok(Page::new(items, page, count_to_u64(total)))
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_popular_unnotified(&self, threshold: i64) -> DomainResult<Vec<Person>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<Person>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {PERSON_COLUMNS} FROM people p
                     WHERE p.like_count > ?1 AND p.admin_notified = 0
                     ORDER BY p.id"
                ))
                .map_err(map_sql_error)?;

            let people = stmt
                .query_map(params![threshold], map_person_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            Ok(people)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn mark_notified(&self, id: i64) -> DomainResult<bool> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<bool> {
            let conn = db.get_connection()?;
            let updated = conn
                .execute(
                    "UPDATE people SET admin_notified = 1, updated_at = ?2
                     WHERE id = ?1 AND admin_notified = 0",
                    params![id, Utc::now().timestamp_millis()],
                )
                .map_err(map_sql_error)?;
            Ok(updated > 0)
        })
        .await
        .map_err(map_join_error)?
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

/// Map a row selected with [`PERSON_COLUMNS`] starting at column 0.
pub(crate) fn map_person_row(row: &Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        pictures: decode_pictures(3, &row.get::<_, String>(3)?)?,
        location: row.get(4)?,
        like_count: row.get(5)?,
        admin_notified: int_to_bool(row.get(6)?),
        created_at: millis_to_datetime(7, row.get(7)?)?,
        updated_at: millis_to_datetime(8, row.get(8)?)?,
    })
}

// =============================================================================
// Utility Functions
// =============================================================================

pub(crate) fn millis_to_datetime(column: usize, millis: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            column,
            Type::Integer,
            format!("timestamp {millis} out of range").into(),
        )
    })
}

fn decode_pictures(column: usize, raw: &str) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err)))
}

fn encode_pictures(pictures: &[String]) -> DomainResult<String> {
    serde_json::to_string(pictures).map_err(|err| {
        tinderbox_domain::TinderboxError::Internal(format!("failed to encode pictures: {err}"))
    })
}

fn int_to_bool(value: i64) -> bool {
    value != 0
}

fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

// =============================================================================
// Tests
// =============================================================================
