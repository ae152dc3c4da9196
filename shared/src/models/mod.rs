//! Data models
//!
//! Shared between event-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY, snowflake values).

pub mod assignment;
pub mod event;
pub mod guest;
pub mod room;

// Re-exports
pub use assignment::*;
pub use event::*;
pub use guest::*;
pub use room::*;
