//! Room Assignment Model

use serde::{Deserialize, Serialize};

use super::{GuestSummary, RoomDetail};

/// Guest placed in a room slot
///
/// DB invariants: `UNIQUE(room_id, slot)` and `UNIQUE(event_id, guest_id)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: i64,
    pub event_id: i64,
    pub room_id: i64,
    pub slot: i32,
    pub guest_id: i64,
    pub created_at: i64,
}

/// Assignment row joined with guest data, used to render slots
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct AssignedGuest {
    pub room_id: i64,
    pub slot: i32,
    pub guest_id: i64,
    pub name: String,
    pub email: String,
}

impl AssignedGuest {
    pub fn summary(&self) -> GuestSummary {
        GuestSummary {
            id: self.guest_id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// POST /assign payload
///
/// `attendeeId: null` (or absent) clears the slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub room_id: i64,
    pub slot: i32,
    #[serde(default)]
    pub attendee_id: Option<i64>,
}

/// DELETE /{roomId}/unassign payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnassignRequest {
    pub slot: i32,
}

/// Outcome of an assign / unassign call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResult {
    /// false when the request was a no-op
    pub changed: bool,
    /// Target room after the mutation
    pub room: RoomDetail,
    /// Other room the guest was moved out of
    pub vacated_room_id: Option<i64>,
    /// Guest evicted from the target slot
    pub displaced_guest_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_request_null_attendee() {
        let req: AssignRequest =
            serde_json::from_str(r#"{"roomId":5,"slot":2,"attendeeId":null}"#).unwrap();
        assert_eq!(req.room_id, 5);
        assert_eq!(req.slot, 2);
        assert!(req.attendee_id.is_none());

        let req: AssignRequest = serde_json::from_str(r#"{"roomId":5,"slot":1}"#).unwrap();
        assert!(req.attendee_id.is_none());
    }

    #[test]
    fn test_assign_request_with_attendee() {
        let req: AssignRequest =
            serde_json::from_str(r#"{"roomId":5,"slot":1,"attendeeId":42}"#).unwrap();
        assert_eq!(req.attendee_id, Some(42));
    }
}
