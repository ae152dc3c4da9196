//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound | Self::EventNotFound | Self::RoomNotFound | Self::GuestNotFound => {
                StatusCode::NOT_FOUND
            }

            // 409 Conflict
            Self::AlreadyExists
            | Self::RoomNumberExists
            | Self::CapacityBelowOccupancy
            | Self::AssignmentConflict => StatusCode::CONFLICT,

            // 500 Internal Server Error
            Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request
            Self::ValidationFailed | Self::RoomCapacityInvalid | Self::SlotOutOfRange => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}
