//! Room Assignment Repository

use super::RepoResult;
use shared::models::{AssignedGuest, Assignment};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor};

const ASSIGNMENT_COLUMNS: &str = "id, event_id, room_id, slot, guest_id, created_at";

const ASSIGNED_GUEST_SELECT: &str = "SELECT a.room_id, a.slot, a.guest_id, g.name, g.email \
     FROM room_assignment a JOIN guest g ON g.id = a.guest_id";

pub async fn find_by_slot<'e, E>(executor: E, room_id: i64, slot: i32) -> RepoResult<Option<Assignment>>
where
    E: SqliteExecutor<'e>,
{
    let assignment = sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {ASSIGNMENT_COLUMNS} FROM room_assignment WHERE room_id = ? AND slot = ?"
    ))
    .bind(room_id)
    .bind(slot)
    .fetch_optional(executor)
    .await?;
    Ok(assignment)
}

pub async fn find_by_guest<'e, E>(
    executor: E,
    event_id: i64,
    guest_id: i64,
) -> RepoResult<Option<Assignment>>
where
    E: SqliteExecutor<'e>,
{
    let assignment = sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {ASSIGNMENT_COLUMNS} FROM room_assignment WHERE event_id = ? AND guest_id = ?"
    ))
    .bind(event_id)
    .bind(guest_id)
    .fetch_optional(executor)
    .await?;
    Ok(assignment)
}

/// Occupants of a single room, by slot
pub async fn list_for_room<'e, E>(executor: E, room_id: i64) -> RepoResult<Vec<AssignedGuest>>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, AssignedGuest>(&format!(
        "{ASSIGNED_GUEST_SELECT} WHERE a.room_id = ? ORDER BY a.slot"
    ))
    .bind(room_id)
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

/// Occupants of several rooms in one round trip
pub async fn list_for_rooms<'e, E>(executor: E, room_ids: &[i64]) -> RepoResult<Vec<AssignedGuest>>
where
    E: SqliteExecutor<'e>,
{
    if room_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(ASSIGNED_GUEST_SELECT);
    qb.push(" WHERE a.room_id IN (");
    let mut separated = qb.separated(", ");
    for id in room_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY a.room_id, a.slot");

    let rows = qb.build_query_as::<AssignedGuest>().fetch_all(executor).await?;
    Ok(rows)
}

/// Highest occupied slot number of a room, `None` when empty
pub async fn max_occupied_slot<'e, E>(executor: E, room_id: i64) -> RepoResult<Option<i32>>
where
    E: SqliteExecutor<'e>,
{
    let slot: Option<i32> =
        sqlx::query_scalar("SELECT MAX(slot) FROM room_assignment WHERE room_id = ?")
            .bind(room_id)
            .fetch_one(executor)
            .await?;
    Ok(slot)
}

pub async fn insert<'e, E>(executor: E, assignment: &Assignment) -> RepoResult<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO room_assignment (id, event_id, room_id, slot, guest_id, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(assignment.id)
    .bind(assignment.event_id)
    .bind(assignment.room_id)
    .bind(assignment.slot)
    .bind(assignment.guest_id)
    .bind(assignment.created_at)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn delete_by_id<'e, E>(executor: E, id: i64) -> RepoResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query("DELETE FROM room_assignment WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Remove every assignment of a room, returns how many were dropped
pub async fn delete_for_room<'e, E>(executor: E, room_id: i64) -> RepoResult<u64>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query("DELETE FROM room_assignment WHERE room_id = ?")
        .bind(room_id)
        .execute(executor)
        .await?;
    Ok(rows.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::RepoError;
    use crate::db::repository::room;
    use crate::db::repository::test_support::{seed_event, seed_guest, test_pool};
    use shared::models::Room;
    use sqlx::SqlitePool;

    fn assignment(id: i64, room_id: i64, slot: i32, guest_id: i64) -> Assignment {
        Assignment {
            id,
            event_id: 1,
            room_id,
            slot,
            guest_id,
            created_at: 0,
        }
    }

    async fn seeded() -> SqlitePool {
        let pool = test_pool().await;
        seed_event(&pool, 1, "Retreat").await;
        seed_guest(&pool, 10, 1, "Ada").await;
        seed_guest(&pool, 11, 1, "Grace").await;
        for (id, no) in [(1, "101"), (2, "102")] {
            room::insert(
                &pool,
                &Room {
                    id,
                    event_id: 1,
                    room_no: no.to_string(),
                    category: "Standard".to_string(),
                    max_guests: 3,
                    created_at: 0,
                    updated_at: 0,
                },
            )
            .await
            .unwrap();
        }
        pool
    }

    #[tokio::test]
    async fn test_slot_and_guest_uniqueness() {
        let pool = seeded().await;
        insert(&pool, &assignment(100, 1, 1, 10)).await.unwrap();

        let same_slot = insert(&pool, &assignment(101, 1, 1, 11)).await.unwrap_err();
        assert!(matches!(same_slot, RepoError::Duplicate(_)));

        let same_guest = insert(&pool, &assignment(102, 2, 1, 10)).await.unwrap_err();
        assert!(matches!(same_guest, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_lookup_and_listing() {
        let pool = seeded().await;
        insert(&pool, &assignment(100, 1, 2, 10)).await.unwrap();
        insert(&pool, &assignment(101, 2, 1, 11)).await.unwrap();

        let a = find_by_slot(&pool, 1, 2).await.unwrap().unwrap();
        assert_eq!(a.guest_id, 10);
        assert!(find_by_slot(&pool, 1, 1).await.unwrap().is_none());

        let b = find_by_guest(&pool, 1, 11).await.unwrap().unwrap();
        assert_eq!(b.room_id, 2);

        let rows = list_for_rooms(&pool, &[1, 2]).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Ada");

        assert!(list_for_rooms(&pool, &[]).await.unwrap().is_empty());
        assert_eq!(list_for_room(&pool, 2).await.unwrap().len(), 1);

        assert_eq!(max_occupied_slot(&pool, 1).await.unwrap(), Some(2));
        assert_eq!(max_occupied_slot(&pool, 3).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_room_delete_cascades() {
        let pool = seeded().await;
        insert(&pool, &assignment(100, 1, 1, 10)).await.unwrap();

        room::delete(&pool, 1, 1).await.unwrap();
        assert!(find_by_guest(&pool, 1, 10).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_helpers() {
        let pool = seeded().await;
        insert(&pool, &assignment(100, 1, 1, 10)).await.unwrap();
        insert(&pool, &assignment(101, 1, 2, 11)).await.unwrap();

        assert!(delete_by_id(&pool, 100).await.unwrap());
        assert!(!delete_by_id(&pool, 100).await.unwrap());
        assert_eq!(delete_for_room(&pool, 1).await.unwrap(), 1);
    }
}
