//! Repository Module
//!
//! Free async functions over `SqliteExecutor`, so every query runs either on
//! the pool or inside a caller-owned transaction (`&mut *tx`).

pub mod assignment;
pub mod event;
pub mod guest;
pub mod room;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Lost a write race (SQLITE_BUSY / SQLITE_LOCKED after busy_timeout)
    #[error("Database busy: {0}")]
    Busy(String),
}

/// SQLITE_BUSY, SQLITE_LOCKED and the BUSY_RECOVERY / BUSY_SNAPSHOT / BUSY_TIMEOUT extended codes
const SQLITE_BUSY_CODES: [&str; 5] = ["5", "6", "261", "517", "773"];

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound("Row not found".into()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepoError::Duplicate(db_err.message().to_string())
            }
            sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
                RepoError::Validation(db_err.message().to_string())
            }
            sqlx::Error::Database(db_err)
                if db_err
                    .code()
                    .is_some_and(|code| SQLITE_BUSY_CODES.contains(&code.as_ref())) =>
            {
                RepoError::Busy(db_err.message().to_string())
            }
            other => RepoError::Database(other.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Busy(msg) => AppError::with_message(
                ErrorCode::AssignmentConflict,
                format!("Concurrent update, retry: {msg}"),
            ),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Build a `LIKE ... ESCAPE '\'` pattern matching `term` anywhere
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Seed helpers for repository and service tests

    use crate::db::DbService;
    use sqlx::SqlitePool;

    pub async fn test_pool() -> SqlitePool {
        DbService::in_memory().await.unwrap().pool
    }

    pub async fn seed_event(pool: &SqlitePool, id: i64, name: &str) {
        sqlx::query("INSERT INTO event (id, name, created_at) VALUES (?, ?, 0)")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await
            .unwrap();
    }

    pub async fn seed_guest(pool: &SqlitePool, id: i64, event_id: i64, name: &str) {
        sqlx::query("INSERT INTO guest (id, event_id, name, email) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(event_id)
            .bind(name)
            .bind(format!("{}@example.com", name.to_lowercase()))
            .execute(pool)
            .await
            .unwrap();
    }
}
