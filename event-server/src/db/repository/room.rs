//! Room Repository

use super::{RepoError, RepoResult, like_pattern};
use shared::models::Room;
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor};

const ROOM_COLUMNS: &str = "id, event_id, room_no, category, max_guests, created_at, updated_at";

/// Listing filters (already trimmed, blank values dropped)
#[derive(Debug, Clone, Copy, Default)]
pub struct RoomFilter<'a> {
    /// Exact category match
    pub category: Option<&'a str>,
    /// Substring of room number or category
    pub search: Option<&'a str>,
}

fn push_filters<'a>(qb: &mut QueryBuilder<'a, Sqlite>, event_id: i64, filter: RoomFilter<'_>) {
    qb.push(" WHERE event_id = ");
    qb.push_bind(event_id);

    if let Some(category) = filter.category {
        qb.push(" AND category = ");
        qb.push_bind(category.to_string());
    }
    if let Some(term) = filter.search {
        let pattern = like_pattern(term);
        qb.push(" AND (room_no LIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" ESCAPE '\\' OR category LIKE ");
        qb.push_bind(pattern);
        qb.push(" ESCAPE '\\')");
    }
}

pub async fn find_in_event<'e, E>(executor: E, event_id: i64, id: i64) -> RepoResult<Option<Room>>
where
    E: SqliteExecutor<'e>,
{
    let room = sqlx::query_as::<_, Room>(&format!(
        "SELECT {ROOM_COLUMNS} FROM room WHERE id = ? AND event_id = ?"
    ))
    .bind(id)
    .bind(event_id)
    .fetch_optional(executor)
    .await?;
    Ok(room)
}

pub async fn find_by_room_no<'e, E>(
    executor: E,
    event_id: i64,
    room_no: &str,
) -> RepoResult<Option<Room>>
where
    E: SqliteExecutor<'e>,
{
    let room = sqlx::query_as::<_, Room>(&format!(
        "SELECT {ROOM_COLUMNS} FROM room WHERE event_id = ? AND room_no = ? LIMIT 1"
    ))
    .bind(event_id)
    .bind(room_no)
    .fetch_optional(executor)
    .await?;
    Ok(room)
}

/// One page of rooms ordered by room number
pub async fn list<'e, E>(
    executor: E,
    event_id: i64,
    filter: RoomFilter<'_>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Room>>
where
    E: SqliteExecutor<'e>,
{
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!("SELECT {ROOM_COLUMNS} FROM room"));
    push_filters(&mut qb, event_id, filter);
    qb.push(" ORDER BY room_no COLLATE NOCASE, id LIMIT ");
    qb.push_bind(limit);
    qb.push(" OFFSET ");
    qb.push_bind(offset);

    let rooms = qb.build_query_as::<Room>().fetch_all(executor).await?;
    Ok(rooms)
}

pub async fn count<'e, E>(executor: E, event_id: i64, filter: RoomFilter<'_>) -> RepoResult<i64>
where
    E: SqliteExecutor<'e>,
{
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM room");
    push_filters(&mut qb, event_id, filter);

    let total: i64 = qb.build_query_scalar().fetch_one(executor).await?;
    Ok(total)
}

/// Distinct category labels of an event, sorted
pub async fn categories<'e, E>(executor: E, event_id: i64) -> RepoResult<Vec<String>>
where
    E: SqliteExecutor<'e>,
{
    let labels = sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT category FROM room WHERE event_id = ? ORDER BY category COLLATE NOCASE",
    )
    .bind(event_id)
    .fetch_all(executor)
    .await?;
    Ok(labels)
}

pub async fn insert<'e, E>(executor: E, room: &Room) -> RepoResult<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO room (id, event_id, room_no, category, max_guests, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(room.id)
    .bind(room.event_id)
    .bind(&room.room_no)
    .bind(&room.category)
    .bind(room.max_guests)
    .bind(room.created_at)
    .bind(room.updated_at)
    .execute(executor)
    .await?;
    Ok(())
}

/// Overwrite the mutable columns of an existing room
pub async fn update<'e, E>(executor: E, room: &Room) -> RepoResult<()>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query(
        "UPDATE room SET room_no = ?1, category = ?2, max_guests = ?3, updated_at = ?4 WHERE id = ?5 AND event_id = ?6",
    )
    .bind(&room.room_no)
    .bind(&room.category)
    .bind(room.max_guests)
    .bind(room.updated_at)
    .bind(room.id)
    .bind(room.event_id)
    .execute(executor)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Room {} not found", room.id)));
    }
    Ok(())
}

pub async fn delete<'e, E>(executor: E, event_id: i64, id: i64) -> RepoResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query("DELETE FROM room WHERE id = ? AND event_id = ?")
        .bind(id)
        .bind(event_id)
        .execute(executor)
        .await?;
    Ok(rows.rows_affected() > 0)
}
