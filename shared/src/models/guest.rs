//! Guest Model

use serde::{Deserialize, Serialize};

/// Guest entity (read-only here, owned by the guest list API)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub email: String,
}

/// Guest summary embedded in an occupied slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Guest with current room placement (null fields when unassigned)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct GuestPlacement {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub room_id: Option<i64>,
    pub room_no: Option<String>,
    pub slot: Option<i32>,
}

impl GuestPlacement {
    pub fn is_assigned(&self) -> bool {
        self.room_id.is_some()
    }
}
