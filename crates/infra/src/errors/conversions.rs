//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;
use tinderbox_domain::TinderboxError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub TinderboxError);

impl From<InfraError> for TinderboxError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<TinderboxError> for InfraError {
    fn from(value: TinderboxError) -> Self {
        InfraError(value)
    }
}

trait IntoTinderboxError {
    fn into_tinderbox(self) -> TinderboxError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → TinderboxError */
/* -------------------------------------------------------------------------- */

// SQLITE_CONSTRAINT_UNIQUE / SQLITE_CONSTRAINT_PRIMARYKEY
const UNIQUE_VIOLATION_CODES: [i32; 2] = [2067, 1555];
// SQLITE_CONSTRAINT_FOREIGNKEY
const FOREIGN_KEY_VIOLATION_CODE: i32 = 787;

impl IntoTinderboxError for SqlError {
    fn into_tinderbox(self) -> TinderboxError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        TinderboxError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        TinderboxError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, code)
                        if UNIQUE_VIOLATION_CODES.contains(&code) =>
                    {
                        TinderboxError::DuplicateAction(format!(
                            "unique constraint violation: {message}"
                        ))
                    }
                    (ErrorCode::ConstraintViolation, FOREIGN_KEY_VIOLATION_CODE) => {
                        TinderboxError::NotFound("referenced row does not exist".into())
                    }
                    _ => TinderboxError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => {
                TinderboxError::NotFound("no rows returned by query".into())
            }
            RE::FromSqlConversionFailure(_, _, cause) => {
                TinderboxError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                TinderboxError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => {
                TinderboxError::Database("invalid UTF-8 returned from sqlite".into())
            }
            RE::InvalidPath(path) => TinderboxError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => TinderboxError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_tinderbox())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → TinderboxError */
/* -------------------------------------------------------------------------- */

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(TinderboxError::Database(format!("connection pool error: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TinderboxError */
/* -------------------------------------------------------------------------- */

// reqwest is only used to talk to the mail relay, so every failure is a
// delivery failure.
impl IntoTinderboxError for HttpError {
    fn into_tinderbox(self) -> TinderboxError {
        if self.is_timeout() {
            return TinderboxError::NotificationDelivery("mail relay request timed out".into());
        }

        if self.is_connect() {
            return TinderboxError::NotificationDelivery("mail relay connection failure".into());
        }

        if let Some(status) = self.status() {
            return TinderboxError::NotificationDelivery(format!(
                "mail relay responded HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            ));
        }

        TinderboxError::NotificationDelivery(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_tinderbox())
    }
}

/// Map a rusqlite error straight to the domain error.
pub fn map_sql_error(err: SqlError) -> TinderboxError {
    InfraError::from(err).into()
}

/// Map a failed `spawn_blocking` join to the domain error.
pub fn map_join_error(err: tokio::task::JoinError) -> TinderboxError {
    TinderboxError::Internal(format!("Task join error: {err}"))
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
