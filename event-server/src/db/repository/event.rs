//! Event Repository (read-only)

use super::RepoResult;
use shared::models::Event;
use sqlx::SqliteExecutor;

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Event>>
where
    E: SqliteExecutor<'e>,
{
    let event = sqlx::query_as::<_, Event>("SELECT id, name, created_at FROM event WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(event)
}

pub async fn exists<'e, E>(executor: E, id: i64) -> RepoResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM event WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(found.is_some())
}
