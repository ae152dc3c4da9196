//! Guest Repository (read-only)

use super::{RepoResult, like_pattern};
use shared::models::{Guest, GuestPlacement};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor};

pub async fn find_in_event<'e, E>(executor: E, event_id: i64, id: i64) -> RepoResult<Option<Guest>>
where
    E: SqliteExecutor<'e>,
{
    let guest = sqlx::query_as::<_, Guest>(
        "SELECT id, event_id, name, email FROM guest WHERE id = ? AND event_id = ?",
    )
    .bind(id)
    .bind(event_id)
    .fetch_optional(executor)
    .await?;
    Ok(guest)
}

/// Guests of an event with their current room placement, ordered by name
pub async fn list_placements<'e, E>(
    executor: E,
    event_id: i64,
    unassigned_only: bool,
    search: Option<&str>,
) -> RepoResult<Vec<GuestPlacement>>
where
    E: SqliteExecutor<'e>,
{
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT g.id, g.name, g.email, a.room_id, r.room_no, a.slot \
         FROM guest g \
         LEFT JOIN room_assignment a ON a.guest_id = g.id AND a.event_id = g.event_id \
         LEFT JOIN room r ON r.id = a.room_id \
         WHERE g.event_id = ",
    );
    qb.push_bind(event_id);

    if unassigned_only {
        qb.push(" AND a.id IS NULL");
    }
    if let Some(term) = search {
        let pattern = like_pattern(term);
        qb.push(" AND (g.name LIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" ESCAPE '\\' OR g.email LIKE ");
        qb.push_bind(pattern);
        qb.push(" ESCAPE '\\')");
    }
    qb.push(" ORDER BY g.name COLLATE NOCASE, g.id");

    let guests = qb
        .build_query_as::<GuestPlacement>()
        .fetch_all(executor)
        .await?;
    Ok(guests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::{seed_event, seed_guest, test_pool};

    #[tokio::test]
    async fn test_find_in_event_scopes_by_event() {
        let pool = test_pool().await;
        seed_event(&pool, 1, "A").await;
        seed_event(&pool, 2, "B").await;
        seed_guest(&pool, 10, 1, "Ada").await;

        assert!(find_in_event(&pool, 1, 10).await.unwrap().is_some());
        assert!(find_in_event(&pool, 2, 10).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_placements_search() {
        let pool = test_pool().await;
        seed_event(&pool, 1, "A").await;
        seed_guest(&pool, 10, 1, "Ada").await;
        seed_guest(&pool, 11, 1, "Grace").await;
        seed_guest(&pool, 12, 1, "Alan").await;

        let all = list_placements(&pool, 1, false, None).await.unwrap();
        let names: Vec<&str> = all.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Alan", "Grace"]);
        assert!(all.iter().all(|g| !g.is_assigned()));

        let found = list_placements(&pool, 1, false, Some("grace@")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 11);

        let none = list_placements(&pool, 1, false, Some("%")).await.unwrap();
        assert!(none.is_empty());
    }
}
