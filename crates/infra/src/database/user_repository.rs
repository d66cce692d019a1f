//! Local user directory using SQLite

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use tinderbox_core::UserDirectory;
use tinderbox_domain::{Result as DomainResult, User};
use tokio::task;

use super::manager::DbManager;
use super::person_repository::millis_to_datetime;
use crate::errors::conversions::{map_join_error, map_sql_error};

/// SQLite-backed user directory
pub struct SqliteUserRepository {
    db: Arc<DbManager>,
}

impl SqliteUserRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Insert a user. Emails are unique.
    pub async fn create(&self, name: &str, email: &str) -> DomainResult<User> {
        let db = Arc::clone(&self.db);
        let name = name.to_string();
        let email = email.to_string();

        task::spawn_blocking(move || -> DomainResult<User> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO users (name, email, created_at) VALUES (?1, ?2, ?3)",
                params![name, email, Utc::now().timestamp_millis()],
            )
            .map_err(map_sql_error)?;

            conn.query_row(
                "SELECT id, name, email, created_at FROM users WHERE id = ?1",
                params![conn.last_insert_rowid()],
                map_user_row,
            )
            .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    /// Look a user up by email.
    pub async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let db = Arc::clone(&self.db);
        let email = email.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<User>> {
            let conn = db.get_connection()?;
            conn.query_row(
                "SELECT id, name, email, created_at FROM users WHERE email = ?1",
                params![email],
                map_user_row,
            )
            .optional()
            .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl UserDirectory for SqliteUserRepository {
    async fn exists(&self, user_id: i64) -> DomainResult<bool> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<bool> {
            let conn = db.get_connection()?;
            conn.query_row("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)", params![user_id], |row| {
                row.get(0)
            })
            .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        created_at: millis_to_datetime(3, row.get(3)?)?,
    })
}
