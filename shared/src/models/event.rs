//! Event Model

use serde::{Deserialize, Serialize};

/// Event entity (read-only here, owned by the event CRUD API)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
}
