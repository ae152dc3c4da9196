//! Room Model

use serde::{Deserialize, Serialize};

use super::{AssignedGuest, GuestSummary};

/// Smallest allowed room capacity
pub const MIN_ROOM_CAPACITY: i32 = 1;
/// Largest allowed room capacity (slots are numbered 1..=3)
pub const MAX_ROOM_CAPACITY: i32 = 3;

/// Room entity (房间)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub event_id: i64,
    /// Unique per event
    pub room_no: String,
    pub category: String,
    /// Capacity, 1..=3
    pub max_guests: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create room payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCreate {
    pub room_no: String,
    pub category: String,
    pub max_guests: i32,
}

/// Update room payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdate {
    pub room_no: Option<String>,
    pub category: Option<String>,
    pub max_guests: Option<i32>,
}

/// Derived occupancy status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Empty,
    Partial,
    Full,
}

impl RoomStatus {
    /// `empty` with nobody assigned, `full` once every slot is taken
    pub fn derive(assigned: usize, capacity: i32) -> Self {
        if assigned == 0 {
            Self::Empty
        } else if assigned as i64 >= capacity as i64 {
            Self::Full
        } else {
            Self::Partial
        }
    }
}

/// One addressable slot of a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SlotView {
    Vacant { slot: i32 },
    Occupied { slot: i32, guest: GuestSummary },
}

impl SlotView {
    pub fn slot(&self) -> i32 {
        match self {
            Self::Vacant { slot } | Self::Occupied { slot, .. } => *slot,
        }
    }

    pub fn guest(&self) -> Option<&GuestSummary> {
        match self {
            Self::Vacant { .. } => None,
            Self::Occupied { guest, .. } => Some(guest),
        }
    }
}

/// Room with per-slot assignment detail, as served to the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetail {
    #[serde(flatten)]
    pub room: Room,
    pub status: RoomStatus,
    pub assigned_count: usize,
    pub slots: Vec<SlotView>,
}

impl RoomDetail {
    /// Build the slot table of `room` from its assignment rows
    ///
    /// Rows belonging to other rooms are ignored.
    pub fn build(room: Room, assigned: &[AssignedGuest]) -> Self {
        let slots: Vec<SlotView> = (1..=room.max_guests)
            .map(|slot| {
                match assigned
                    .iter()
                    .find(|a| a.room_id == room.id && a.slot == slot)
                {
                    Some(a) => SlotView::Occupied {
                        slot,
                        guest: a.summary(),
                    },
                    None => SlotView::Vacant { slot },
                }
            })
            .collect();

        let assigned_count = slots.iter().filter(|s| s.guest().is_some()).count();

        Self {
            status: RoomStatus::derive(assigned_count, room.max_guests),
            assigned_count,
            slots,
            room,
        }
    }

    pub fn guest_at(&self, slot: i32) -> Option<&GuestSummary> {
        self.slots
            .iter()
            .find(|s| s.slot() == slot)
            .and_then(SlotView::guest)
    }
}
