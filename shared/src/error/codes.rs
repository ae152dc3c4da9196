//! Unified error codes for the room assignment service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Event errors
//! - 2xxx: Room errors
//! - 3xxx: Guest / assignment errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 1xxx: Event ====================
    /// Event not found
    EventNotFound = 1001,

    // ==================== 2xxx: Room ====================
    /// Room not found
    RoomNotFound = 2001,
    /// Room number already exists in the event
    RoomNumberExists = 2002,
    /// Room capacity outside the allowed range
    RoomCapacityInvalid = 2003,
    /// Slot number outside 1..=capacity
    SlotOutOfRange = 2004,
    /// Capacity would drop below an occupied slot
    CapacityBelowOccupancy = 2005,

    // ==================== 3xxx: Guest ====================
    /// Guest not found in the event
    GuestNotFound = 3001,
    /// Assignment was changed by a concurrent request
    AssignmentConflict = 3002,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            // Event
            ErrorCode::EventNotFound => "Event not found",

            // Room
            ErrorCode::RoomNotFound => "Room not found",
            ErrorCode::RoomNumberExists => "Room number already exists in this event",
            ErrorCode::RoomCapacityInvalid => "Room capacity must be between 1 and 3",
            ErrorCode::SlotOutOfRange => "Slot is outside the room capacity",
            ErrorCode::CapacityBelowOccupancy => "Capacity is below an occupied slot",

            // Guest
            ErrorCode::GuestNotFound => "Guest not found",
            ErrorCode::AssignmentConflict => "Assignment changed concurrently, please retry",

            // System
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Event
            1001 => Ok(ErrorCode::EventNotFound),

            // Room
            2001 => Ok(ErrorCode::RoomNotFound),
            2002 => Ok(ErrorCode::RoomNumberExists),
            2003 => Ok(ErrorCode::RoomCapacityInvalid),
            2004 => Ok(ErrorCode::SlotOutOfRange),
            2005 => Ok(ErrorCode::CapacityBelowOccupancy),

            // Guest
            3001 => Ok(ErrorCode::GuestNotFound),
            3002 => Ok(ErrorCode::AssignmentConflict),

            // System
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::AlreadyExists.code(), 4);

        assert_eq!(ErrorCode::EventNotFound.code(), 1001);

        assert_eq!(ErrorCode::RoomNotFound.code(), 2001);
        assert_eq!(ErrorCode::RoomNumberExists.code(), 2002);
        assert_eq!(ErrorCode::RoomCapacityInvalid.code(), 2003);
        assert_eq!(ErrorCode::SlotOutOfRange.code(), 2004);
        assert_eq!(ErrorCode::CapacityBelowOccupancy.code(), 2005);

        assert_eq!(ErrorCode::GuestNotFound.code(), 3001);
        assert_eq!(ErrorCode::AssignmentConflict.code(), 3002);

        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_u16() {
        assert_eq!(ErrorCode::try_from(2002), Ok(ErrorCode::RoomNumberExists));
        assert_eq!(ErrorCode::try_from(3001), Ok(ErrorCode::GuestNotFound));
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::SlotOutOfRange).unwrap();
        assert_eq!(json, "2004");

        let code: ErrorCode = serde_json::from_str("1001").unwrap();
        assert_eq!(code, ErrorCode::EventNotFound);

        assert!(serde_json::from_str::<ErrorCode>("7777").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::RoomNotFound.to_string(), "2001");
    }
}
