//! Room assignment service
//!
//! Owns every rule about rooms and slots: capacity bounds, room number
//! uniqueness, one slot per guest and one guest per slot. Each mutation is a
//! single SQLite transaction; the unique indexes on `room_assignment` catch
//! writers that race between our read and our insert.

use sqlx::{SqliteConnection, SqlitePool};

use shared::models::{
    AssignRequest, Assignment, AssignmentResult, GuestPlacement, Room, RoomCreate, RoomDetail,
    RoomUpdate,
};
use shared::request::{GuestListQuery, RoomListQuery};
use shared::response::RoomPage;
use shared::util::{now_millis, snowflake_id};

use crate::db::repository::room::RoomFilter;
use crate::db::repository::{RepoError, assignment, event, guest, room};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_capacity, validate_required_text, validate_slot,
};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Clone, Debug)]
pub struct RoomAssignmentService {
    pool: SqlitePool,
}

impl RoomAssignmentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== Queries ====================

    /// Paginated, filtered room list with slot detail
    pub async fn list_rooms(&self, event_id: i64, query: &RoomListQuery) -> AppResult<RoomPage> {
        ensure_event(&self.pool, event_id).await?;

        let filter = RoomFilter {
            category: query.category_filter(),
            search: query.search_term(),
        };
        let total = room::count(&self.pool, event_id, filter).await?;
        let rooms = room::list(&self.pool, event_id, filter, query.limit(), query.offset()).await?;

        let ids: Vec<i64> = rooms.iter().map(|r| r.id).collect();
        let assigned = assignment::list_for_rooms(&self.pool, &ids).await?;

        let details = rooms
            .into_iter()
            .map(|r| RoomDetail::build(r, &assigned))
            .collect();

        Ok(RoomPage::new(details, total, query.page(), query.page_size()))
    }

    pub async fn get_room(&self, event_id: i64, room_id: i64) -> AppResult<RoomDetail> {
        ensure_event(&self.pool, event_id).await?;
        let room = require_room(&self.pool, event_id, room_id).await?;
        let assigned = assignment::list_for_room(&self.pool, room_id).await?;
        Ok(RoomDetail::build(room, &assigned))
    }

    /// Distinct category labels, sorted
    pub async fn list_categories(&self, event_id: i64) -> AppResult<Vec<String>> {
        ensure_event(&self.pool, event_id).await?;
        Ok(room::categories(&self.pool, event_id).await?)
    }

    /// Guests with their current placement
    pub async fn list_guests(
        &self,
        event_id: i64,
        query: &GuestListQuery,
    ) -> AppResult<Vec<GuestPlacement>> {
        ensure_event(&self.pool, event_id).await?;
        let guests =
            guest::list_placements(&self.pool, event_id, query.unassigned, query.search_term())
                .await?;
        Ok(guests)
    }

    // ==================== Room CRUD ====================

    pub async fn create_room(&self, event_id: i64, payload: RoomCreate) -> AppResult<RoomDetail> {
        let room_no = payload.room_no.trim().to_string();
        let category = payload.category.trim().to_string();
        validate_required_text(&room_no, "roomNo", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&category, "category", MAX_NAME_LEN)?;
        validate_capacity(payload.max_guests)?;

        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;
        ensure_event(&mut *tx, event_id).await?;

        if room::find_by_room_no(&mut *tx, event_id, &room_no)
            .await?
            .is_some()
        {
            return Err(room_number_exists(&room_no));
        }

        let now = now_millis();
        let room = Room {
            id: snowflake_id(),
            event_id,
            room_no,
            category,
            max_guests: payload.max_guests,
            created_at: now,
            updated_at: now,
        };
        room::insert(&mut *tx, &room)
            .await
            .map_err(|e| on_duplicate(e, || room_number_exists(&room.room_no)))?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(
            event_id,
            room_id = room.id,
            room_no = %room.room_no,
            category = %room.category,
            max_guests = room.max_guests,
            "Room created"
        );

        Ok(RoomDetail::build(room, &[]))
    }

    /// Partial update; capacity may only shrink down to the highest occupied slot
    pub async fn update_room(
        &self,
        event_id: i64,
        room_id: i64,
        payload: RoomUpdate,
    ) -> AppResult<RoomDetail> {
        let room_no = payload.room_no.as_deref().map(str::trim);
        let category = payload.category.as_deref().map(str::trim);
        if let Some(room_no) = room_no {
            validate_required_text(room_no, "roomNo", MAX_SHORT_TEXT_LEN)?;
        }
        if let Some(category) = category {
            validate_required_text(category, "category", MAX_NAME_LEN)?;
        }
        if let Some(max_guests) = payload.max_guests {
            validate_capacity(max_guests)?;
        }

        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;
        ensure_event(&mut *tx, event_id).await?;
        let mut room = require_room(&mut *tx, event_id, room_id).await?;
        let mut changed = false;

        if let Some(room_no) = room_no
            && room_no != room.room_no
        {
            if let Some(other) = room::find_by_room_no(&mut *tx, event_id, room_no).await?
                && other.id != room_id
            {
                return Err(room_number_exists(room_no));
            }
            room.room_no = room_no.to_string();
            changed = true;
        }

        if let Some(category) = category
            && category != room.category
        {
            room.category = category.to_string();
            changed = true;
        }

        if let Some(max_guests) = payload.max_guests
            && max_guests != room.max_guests
        {
            if max_guests < room.max_guests
                && let Some(occupied) = assignment::max_occupied_slot(&mut *tx, room_id).await?
                && occupied > max_guests
            {
                return Err(AppError::with_message(
                    ErrorCode::CapacityBelowOccupancy,
                    format!(
                        "Cannot reduce capacity to {max_guests}: slot {occupied} is occupied"
                    ),
                )
                .with_detail("room_id", room_id)
                .with_detail("occupiedSlot", occupied));
            }
            room.max_guests = max_guests;
            changed = true;
        }

        if changed {
            room.updated_at = now_millis();
            room::update(&mut *tx, &room)
                .await
                .map_err(|e| on_duplicate(e, || room_number_exists(&room.room_no)))?;
        }

        let assigned = assignment::list_for_room(&mut *tx, room_id).await?;
        tx.commit().await.map_err(RepoError::from)?;

        if changed {
            tracing::info!(
                event_id,
                room_id,
                room_no = %room.room_no,
                category = %room.category,
                max_guests = room.max_guests,
                "Room updated"
            );
        }

        Ok(RoomDetail::build(room, &assigned))
    }

    /// Delete a room together with its assignments
    pub async fn delete_room(&self, event_id: i64, room_id: i64) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;
        ensure_event(&mut *tx, event_id).await?;
        let room = require_room(&mut *tx, event_id, room_id).await?;

        let released = assignment::delete_for_room(&mut *tx, room_id).await?;
        room::delete(&mut *tx, event_id, room_id).await?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(
            event_id,
            room_id,
            room_no = %room.room_no,
            released_guests = released,
            "Room deleted"
        );
        Ok(true)
    }

    // ==================== Assignment ====================

    /// Place a guest in a slot, or clear the slot when `attendee_id` is null
    ///
    /// Moving a guest vacates their previous slot; an occupant of the target
    /// slot is displaced (last writer wins).
    pub async fn assign(&self, event_id: i64, req: AssignRequest) -> AppResult<AssignmentResult> {
        let Some(guest_id) = req.attendee_id else {
            return self.unassign(event_id, req.room_id, req.slot).await;
        };
        validate_slot(req.slot, shared::models::MAX_ROOM_CAPACITY)?;

        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;
        ensure_event(&mut *tx, event_id).await?;
        let room = require_room(&mut *tx, event_id, req.room_id).await?;
        validate_slot(req.slot, room.max_guests)?;

        if guest::find_in_event(&mut *tx, event_id, guest_id)
            .await?
            .is_none()
        {
            return Err(AppError::guest_not_found(guest_id));
        }

        let current = assignment::find_by_guest(&mut *tx, event_id, guest_id).await?;
        if let Some(cur) = &current
            && cur.room_id == room.id
            && cur.slot == req.slot
        {
            let assigned = assignment::list_for_room(&mut *tx, room.id).await?;
            tx.commit().await.map_err(RepoError::from)?;
            return Ok(AssignmentResult {
                changed: false,
                room: RoomDetail::build(room, &assigned),
                vacated_room_id: None,
                displaced_guest_id: None,
            });
        }

        let mut vacated_room_id = None;
        if let Some(cur) = current {
            assignment::delete_by_id(&mut *tx, cur.id)
                .await
                .map_err(assignment_conflict)?;
            if cur.room_id != room.id {
                vacated_room_id = Some(cur.room_id);
            }
            tracing::info!(
                event_id,
                guest_id,
                from_room_id = cur.room_id,
                from_slot = cur.slot,
                "Guest moved out of previous slot"
            );
        }

        let mut displaced_guest_id = None;
        if let Some(occupant) = assignment::find_by_slot(&mut *tx, room.id, req.slot).await? {
            assignment::delete_by_id(&mut *tx, occupant.id)
                .await
                .map_err(assignment_conflict)?;
            displaced_guest_id = Some(occupant.guest_id);
            tracing::info!(
                event_id,
                room_id = room.id,
                slot = req.slot,
                guest_id = occupant.guest_id,
                "Guest displaced from slot"
            );
        }

        let new_assignment = Assignment {
            id: snowflake_id(),
            event_id,
            room_id: room.id,
            slot: req.slot,
            guest_id,
            created_at: now_millis(),
        };
        assignment::insert(&mut *tx, &new_assignment)
            .await
            .map_err(assignment_conflict)?;

        let assigned = assignment::list_for_room(&mut *tx, room.id).await?;
        tx.commit().await.map_err(|e| assignment_conflict(e.into()))?;

        tracing::info!(
            event_id,
            room_id = room.id,
            room_no = %room.room_no,
            slot = req.slot,
            guest_id,
            "Guest assigned"
        );

        Ok(AssignmentResult {
            changed: true,
            room: RoomDetail::build(room, &assigned),
            vacated_room_id,
            displaced_guest_id,
        })
    }

    /// Clear a slot; clearing an empty slot succeeds with `changed = false`
    pub async fn unassign(
        &self,
        event_id: i64,
        room_id: i64,
        slot: i32,
    ) -> AppResult<AssignmentResult> {
        validate_slot(slot, shared::models::MAX_ROOM_CAPACITY)?;

        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;
        ensure_event(&mut *tx, event_id).await?;
        let room = require_room(&mut *tx, event_id, room_id).await?;
        validate_slot(slot, room.max_guests)?;

        let displaced_guest_id = clear_slot(&mut tx, room.id, slot).await?;
        let assigned = assignment::list_for_room(&mut *tx, room.id).await?;
        tx.commit().await.map_err(|e| assignment_conflict(e.into()))?;

        if let Some(guest_id) = displaced_guest_id {
            tracing::info!(
                event_id,
                room_id,
                room_no = %room.room_no,
                slot,
                guest_id,
                "Slot cleared"
            );
        }

        Ok(AssignmentResult {
            changed: displaced_guest_id.is_some(),
            room: RoomDetail::build(room, &assigned),
            vacated_room_id: None,
            displaced_guest_id,
        })
    }
}

// ==================== Helpers ====================

async fn ensure_event<'e, E>(executor: E, event_id: i64) -> AppResult<()>
where
    E: sqlx::SqliteExecutor<'e>,
{
    if event::exists(executor, event_id).await? {
        Ok(())
    } else {
        Err(AppError::event_not_found(event_id))
    }
}

async fn require_room<'e, E>(executor: E, event_id: i64, room_id: i64) -> AppResult<Room>
where
    E: sqlx::SqliteExecutor<'e>,
{
    room::find_in_event(executor, event_id, room_id)
        .await?
        .ok_or_else(|| AppError::room_not_found(room_id))
}

/// Remove the occupant of (room, slot), returning who was there
async fn clear_slot(conn: &mut SqliteConnection, room_id: i64, slot: i32) -> AppResult<Option<i64>> {
    let Some(occupant) = assignment::find_by_slot(&mut *conn, room_id, slot).await? else {
        return Ok(None);
    };
    assignment::delete_by_id(&mut *conn, occupant.id)
        .await
        .map_err(assignment_conflict)?;
    Ok(Some(occupant.guest_id))
}

fn room_number_exists(room_no: &str) -> AppError {
    AppError::with_message(
        ErrorCode::RoomNumberExists,
        format!("Room number '{room_no}' already exists in this event"),
    )
    .with_detail("roomNo", room_no)
}

fn on_duplicate(err: RepoError, conflict: impl FnOnce() -> AppError) -> AppError {
    match err {
        RepoError::Duplicate(_) => conflict(),
        other => other.into(),
    }
}

/// Unique violations and lock contention both mean another writer got there first
fn assignment_conflict(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(msg) | RepoError::Busy(msg) => {
            tracing::warn!(reason = %msg, "Assignment changed concurrently");
            AppError::new(ErrorCode::AssignmentConflict)
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::{seed_event, seed_guest, test_pool};
    use shared::models::RoomStatus;

    const EVENT: i64 = 1;

    async fn service() -> RoomAssignmentService {
        let pool = test_pool().await;
        seed_event(&pool, EVENT, "Summit").await;
        seed_event(&pool, 2, "Other").await;
        for (id, name) in [(10, "Ada"), (11, "Grace"), (12, "Alan"), (13, "Barbara")] {
            seed_guest(&pool, id, EVENT, name).await;
        }
        seed_guest(&pool, 20, 2, "Outsider").await;
        RoomAssignmentService::new(pool)
    }

    async fn create(svc: &RoomAssignmentService, room_no: &str, max_guests: i32) -> RoomDetail {
        svc.create_room(
            EVENT,
            RoomCreate {
                room_no: room_no.to_string(),
                category: "Standard".to_string(),
                max_guests,
            },
        )
        .await
        .unwrap()
    }

    fn req(room_id: i64, slot: i32, guest: Option<i64>) -> AssignRequest {
        AssignRequest {
            room_id,
            slot,
            attendee_id: guest,
        }
    }

    async fn assignment_count(svc: &RoomAssignmentService) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM room_assignment")
            .fetch_one(&svc.pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_room_starts_vacant() {
        let svc = service().await;
        let room = create(&svc, "  101 ", 3).await;

        assert_eq!(room.room.room_no, "101");
        assert_eq!(room.status, RoomStatus::Empty);
        assert_eq!(room.slots.len(), 3);
        assert!(room.slots.iter().all(|s| s.guest().is_none()));
    }

    #[tokio::test]
    async fn test_create_room_validation() {
        let svc = service().await;

        let bad_capacity = RoomCreate {
            room_no: "101".into(),
            category: "Standard".into(),
            max_guests: 4,
        };
        let err = svc.create_room(EVENT, bad_capacity).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RoomCapacityInvalid);

        let blank = RoomCreate {
            room_no: "   ".into(),
            category: "Standard".into(),
            max_guests: 1,
        };
        let err = svc.create_room(EVENT, blank).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let missing_event = RoomCreate {
            room_no: "101".into(),
            category: "Standard".into(),
            max_guests: 1,
        };
        let err = svc.create_room(99, missing_event).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EventNotFound);
    }

    #[tokio::test]
    async fn test_duplicate_room_no_conflicts_and_leaves_data_unchanged() {
        let svc = service().await;
        create(&svc, "101", 2).await;

        let dup = RoomCreate {
            room_no: "101".into(),
            category: "Deluxe".into(),
            max_guests: 3,
        };
        let err = svc.create_room(EVENT, dup).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RoomNumberExists);

        let page = svc
            .list_rooms(EVENT, &RoomListQuery::default())
            .await
            .unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.rooms[0].room.category, "Standard");
        assert_eq!(page.rooms[0].room.max_guests, 2);
    }

    #[tokio::test]
    async fn test_same_room_no_in_other_event_is_allowed() {
        let svc = service().await;
        create(&svc, "101", 2).await;
        let other = RoomCreate {
            room_no: "101".into(),
            category: "Standard".into(),
            max_guests: 2,
        };
        assert!(svc.create_room(2, other).await.is_ok());
    }

    #[tokio::test]
    async fn test_move_within_room() {
        // capacity 2, G1 -> slot 1, then G1 -> slot 2
        let svc = service().await;
        let room = create(&svc, "101", 2).await;
        let id = room.room.id;

        svc.assign(EVENT, req(id, 1, Some(10))).await.unwrap();
        let result = svc.assign(EVENT, req(id, 2, Some(10))).await.unwrap();

        assert!(result.changed);
        assert_eq!(result.vacated_room_id, None);
        assert!(result.room.guest_at(1).is_none());
        assert_eq!(result.room.guest_at(2).map(|g| g.id), Some(10));
        assert_eq!(assignment_count(&svc).await, 1);
    }

    #[tokio::test]
    async fn test_move_between_rooms_vacates_previous() {
        let svc = service().await;
        let a = create(&svc, "101", 2).await.room.id;
        let b = create(&svc, "102", 2).await.room.id;

        svc.assign(EVENT, req(a, 1, Some(10))).await.unwrap();
        let result = svc.assign(EVENT, req(b, 2, Some(10))).await.unwrap();

        assert_eq!(result.vacated_room_id, Some(a));
        let old = svc.get_room(EVENT, a).await.unwrap();
        assert_eq!(old.status, RoomStatus::Empty);
        assert_eq!(result.room.status, RoomStatus::Partial);
    }

    #[tokio::test]
    async fn test_reassign_same_triple_is_noop() {
        let svc = service().await;
        let id = create(&svc, "101", 1).await.room.id;

        let first = svc.assign(EVENT, req(id, 1, Some(10))).await.unwrap();
        assert!(first.changed);
        assert_eq!(first.room.status, RoomStatus::Full);

        let again = svc.assign(EVENT, req(id, 1, Some(10))).await.unwrap();
        assert!(!again.changed);
        assert_eq!(again.room.guest_at(1).map(|g| g.id), Some(10));
        assert_eq!(assignment_count(&svc).await, 1);
    }

    #[tokio::test]
    async fn test_occupied_slot_last_writer_wins() {
        let svc = service().await;
        let id = create(&svc, "101", 2).await.room.id;

        svc.assign(EVENT, req(id, 1, Some(10))).await.unwrap();
        let result = svc.assign(EVENT, req(id, 1, Some(11))).await.unwrap();

        assert_eq!(result.displaced_guest_id, Some(10));
        assert_eq!(result.room.guest_at(1).map(|g| g.id), Some(11));

        let unplaced = svc
            .list_guests(
                EVENT,
                &GuestListQuery {
                    unassigned: true,
                    q: None,
                },
            )
            .await
            .unwrap();
        assert!(unplaced.iter().any(|g| g.id == 10));
        assert!(!unplaced.iter().any(|g| g.id == 11));
    }

    #[tokio::test]
    async fn test_slot_bounds() {
        let svc = service().await;
        let id = create(&svc, "101", 2).await.room.id;

        for slot in [0, 3, 4] {
            let err = svc.assign(EVENT, req(id, slot, Some(10))).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::SlotOutOfRange);
        }
        assert_eq!(assignment_count(&svc).await, 0);
    }

    #[tokio::test]
    async fn test_assign_not_found_cases() {
        let svc = service().await;
        let id = create(&svc, "101", 2).await.room.id;

        let err = svc.assign(EVENT, req(id, 1, Some(999))).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::GuestNotFound);

        // Guest of another event
        let err = svc.assign(EVENT, req(id, 1, Some(20))).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::GuestNotFound);

        let err = svc.assign(EVENT, req(424242, 1, Some(10))).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RoomNotFound);

        // Room exists, but in a different event
        let err = svc.assign(2, req(id, 1, Some(20))).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RoomNotFound);

        let err = svc.assign(99, req(id, 1, Some(10))).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EventNotFound);
    }

    #[tokio::test]
    async fn test_clear_slot_via_null_and_unassign() {
        let svc = service().await;
        let id = create(&svc, "101", 2).await.room.id;
        svc.assign(EVENT, req(id, 2, Some(10))).await.unwrap();

        let cleared = svc.assign(EVENT, req(id, 2, None)).await.unwrap();
        assert!(cleared.changed);
        assert_eq!(cleared.displaced_guest_id, Some(10));
        assert_eq!(cleared.room.status, RoomStatus::Empty);

        // Idempotent
        let again = svc.unassign(EVENT, id, 2).await.unwrap();
        assert!(!again.changed);
        assert_eq!(again.displaced_guest_id, None);

        let err = svc.unassign(EVENT, 424242, 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RoomNotFound);
    }

    #[tokio::test]
    async fn test_delete_room_releases_guests() {
        let svc = service().await;
        let id = create(&svc, "101", 3).await.room.id;
        svc.assign(EVENT, req(id, 1, Some(10))).await.unwrap();
        svc.assign(EVENT, req(id, 3, Some(11))).await.unwrap();

        assert!(svc.delete_room(EVENT, id).await.unwrap());
        assert_eq!(assignment_count(&svc).await, 0);

        let guests = svc
            .list_guests(EVENT, &GuestListQuery::default())
            .await
            .unwrap();
        assert!(guests.iter().all(|g| !g.is_assigned()));

        let err = svc.delete_room(EVENT, id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RoomNotFound);
    }

    #[tokio::test]
    async fn test_update_room() {
        let svc = service().await;
        let a = create(&svc, "101", 3).await.room.id;
        create(&svc, "102", 1).await;
        svc.assign(EVENT, req(a, 2, Some(10))).await.unwrap();

        // Below occupancy
        let err = svc
            .update_room(
                EVENT,
                a,
                RoomUpdate {
                    max_guests: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CapacityBelowOccupancy);

        // Down to the occupied slot is fine
        let updated = svc
            .update_room(
                EVENT,
                a,
                RoomUpdate {
                    max_guests: Some(2),
                    category: Some(" Deluxe ".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.room.max_guests, 2);
        assert_eq!(updated.room.category, "Deluxe");
        assert_eq!(updated.status, RoomStatus::Partial);

        // Room number taken by the other room
        let err = svc
            .update_room(
                EVENT,
                a,
                RoomUpdate {
                    room_no: Some("102".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RoomNumberExists);

        // Keeping its own number is not a conflict
        let same = svc
            .update_room(
                EVENT,
                a,
                RoomUpdate {
                    room_no: Some("101".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(same.room.room_no, "101");
    }

    #[tokio::test]
    async fn test_list_rooms_pages_and_categories() {
        let svc = service().await;
        for n in 1..=5 {
            create(&svc, &format!("10{n}"), 2).await;
        }
        svc.create_room(
            EVENT,
            RoomCreate {
                room_no: "201".into(),
                category: "Suite".into(),
                max_guests: 1,
            },
        )
        .await
        .unwrap();

        let query = RoomListQuery {
            page: Some(2),
            page_size: Some(4),
            ..Default::default()
        };
        let page = svc.list_rooms(EVENT, &query).await.unwrap();
        assert_eq!(page.total_count, 6);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.rooms.len(), 2);
        assert_eq!(page.rooms[1].room.room_no, "201");

        let query = RoomListQuery {
            category: Some("Suite".into()),
            ..Default::default()
        };
        let page = svc.list_rooms(EVENT, &query).await.unwrap();
        assert_eq!(page.total_count, 1);

        let categories = svc.list_categories(EVENT).await.unwrap();
        assert_eq!(categories, vec!["Standard", "Suite"]);

        let err = svc
            .list_rooms(99, &RoomListQuery::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EventNotFound);
    }

    /// Deterministic pseudo-random walk of assign calls; invariants must hold after each step
    #[tokio::test]
    async fn test_invariants_hold_over_assignment_sequence() {
        let svc = service().await;
        let mut rooms = Vec::new();
        for (no, cap) in [("101", 1), ("102", 2), ("103", 3)] {
            rooms.push(create(&svc, no, cap).await.room);
        }
        let guests = [10_i64, 11, 12, 13];

        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = |bound: u64| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed % bound
        };

        for _ in 0..200 {
            let room = &rooms[next(rooms.len() as u64) as usize];
            let slot = next(room.max_guests as u64) as i32 + 1;
            let guest = match next(5) {
                4 => None,
                i => Some(guests[i as usize]),
            };
            svc.assign(EVENT, req(room.id, slot, guest)).await.unwrap();

            let page = svc
                .list_rooms(EVENT, &RoomListQuery::default())
                .await
                .unwrap();
            let mut seen = std::collections::HashSet::new();
            for detail in &page.rooms {
                assert!(detail.assigned_count as i32 <= detail.room.max_guests);
                for slot in &detail.slots {
                    if let Some(g) = slot.guest() {
                        assert!(seen.insert(g.id), "guest {} placed twice", g.id);
                    }
                }
            }
            let rows = assignment_count(&svc).await;
            assert_eq!(rows as usize, seen.len());
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_assigns_conflict_instead_of_corrupting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("race.db");
        let db = crate::db::DbService::new(path.to_str().unwrap(), 5)
            .await
            .unwrap();
        seed_event(&db.pool, EVENT, "Summit").await;
        let guests: Vec<i64> = (100..112).collect();
        for id in &guests {
            seed_guest(&db.pool, *id, EVENT, &format!("Guest{id}")).await;
        }

        let svc = RoomAssignmentService::new(db.pool.clone());
        let mut rooms = Vec::new();
        for (no, cap) in [("201", 1), ("202", 2), ("203", 3)] {
            rooms.push(create(&svc, no, cap).await.room);
        }

        let mut handles = Vec::new();
        for i in 0..240_usize {
            let svc = svc.clone();
            let room = &rooms[i % rooms.len()];
            let (room_id, slot) = (room.id, (i / rooms.len()) as i32 % room.max_guests + 1);
            let guest_id = guests[(i * 7) % guests.len()];
            handles.push(tokio::spawn(async move {
                svc.assign(EVENT, req(room_id, slot, Some(guest_id))).await
            }));
        }

        let mut succeeded = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => succeeded += 1,
                Err(err) => assert_eq!(err.code, ErrorCode::AssignmentConflict, "{err}"),
            }
        }
        assert!(succeeded > 0);

        let dup_guests: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM (SELECT guest_id FROM room_assignment GROUP BY event_id, guest_id HAVING COUNT(*) > 1)",
        )
        .fetch_one(&db.pool)
        .await
        .unwrap();
        let dup_slots: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM (SELECT room_id FROM room_assignment GROUP BY room_id, slot HAVING COUNT(*) > 1)",
        )
        .fetch_one(&db.pool)
        .await
        .unwrap();
        assert_eq!(dup_guests, 0);
        assert_eq!(dup_slots, 0);

        let page = svc
            .list_rooms(EVENT, &RoomListQuery::default())
            .await
            .unwrap();
        let mut placed = 0;
        for detail in &page.rooms {
            assert!(detail.assigned_count as i32 <= detail.room.max_guests);
            placed += detail.assigned_count as i64;
        }
        assert_eq!(placed, assignment_count(&svc).await);
    }
}
