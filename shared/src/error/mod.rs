//! Unified error system
//!
//! This module provides the error handling used by every layer:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Error body format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Event errors
//! - 2xxx: Room errors
//! - 3xxx: Guest / assignment errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::RoomNotFound);
//!
//! // Create an error with details
//! let err = AppError::validation("roomNo must not be empty")
//!     .with_detail("field", "roomNo");
//!
//! // Convert to API response
//! let response = ApiResponse::error(&err);
//! assert_eq!(response.code, 2);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
