//! Request types for the shared crate
//!
//! Query-string DTOs for the room and guest list endpoints

use serde::Deserialize;

/// Default page size
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Maximum page size
pub const MAX_PAGE_SIZE: u32 = 100;

/// Room list query parameters
///
/// `?page=2&pageSize=50&category=Deluxe&q=10`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomListQuery {
    /// Page number (1-based, default: 1)
    pub page: Option<i64>,

    /// Items per page (default: 20, max: 100)
    pub page_size: Option<i64>,

    /// Exact category filter
    pub category: Option<String>,

    /// Free-text search over room number and category
    pub q: Option<String>,
}

impl RoomListQuery {
    /// Effective page, values below 1 clamp to 1
    pub fn page(&self) -> u32 {
        self.page
            .unwrap_or(1)
            .clamp(1, u32::MAX as i64) as u32
    }

    /// Effective page size, clamped to 1..=100
    pub fn page_size(&self) -> u32 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE as i64)
            .clamp(1, MAX_PAGE_SIZE as i64) as u32
    }

    /// Get the offset for database queries
    pub fn offset(&self) -> i64 {
        (self.page() as i64 - 1) * self.page_size() as i64
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> i64 {
        self.page_size() as i64
    }

    /// Trimmed category, `None` when blank
    pub fn category_filter(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }

    /// Trimmed search term, `None` when blank
    pub fn search_term(&self) -> Option<&str> {
        non_blank(self.q.as_deref())
    }
}

/// Guest list query parameters
///
/// `?unassigned=true&q=ada`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuestListQuery {
    /// Only guests without a room
    #[serde(default)]
    pub unassigned: bool,

    /// Free-text search over name and email
    pub q: Option<String>,
}

impl GuestListQuery {
    pub fn search_term(&self) -> Option<&str> {
        non_blank(self.q.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
