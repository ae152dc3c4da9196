//! Shared types for the room assignment service
//!
//! Domain models, the unified error system, request/response DTOs and
//! small utilities used by the server and its tests.

pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use request::{GuestListQuery, RoomListQuery};
pub use response::RoomPage;
