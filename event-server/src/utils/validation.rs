//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement.

use crate::utils::{AppError, ErrorCode};
use shared::models::{MAX_ROOM_CAPACITY, MIN_ROOM_CAPACITY};

// ── Text length limits ──────────────────────────────────────────────

/// Category labels
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: room numbers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Room capacity must be 1..=3
pub fn validate_capacity(max_guests: i32) -> Result<(), AppError> {
    if !(MIN_ROOM_CAPACITY..=MAX_ROOM_CAPACITY).contains(&max_guests) {
        return Err(AppError::with_message(
            ErrorCode::RoomCapacityInvalid,
            format!(
                "maxGuests must be between {MIN_ROOM_CAPACITY} and {MAX_ROOM_CAPACITY}, got {max_guests}"
            ),
        )
        .with_detail("maxGuests", max_guests));
    }
    Ok(())
}

/// Slot must be addressable in a room of `capacity`
pub fn validate_slot(slot: i32, capacity: i32) -> Result<(), AppError> {
    let upper = capacity.min(MAX_ROOM_CAPACITY);
    if slot < 1 || slot > upper {
        return Err(AppError::with_message(
            ErrorCode::SlotOutOfRange,
            format!("Slot {slot} is out of range (1..={upper})"),
        )
        .with_detail("slot", slot));
    }
    Ok(())
}
