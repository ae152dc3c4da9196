//! API Response types
//!
//! Success bodies are served as plain JSON; errors use [`crate::ApiResponse`].

use serde::{Deserialize, Serialize};

use crate::models::RoomDetail;

/// Paginated room list
///
/// ```json
/// { "rooms": [...], "totalCount": 42, "page": 1, "pageSize": 20, "totalPages": 3 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPage {
    pub rooms: Vec<RoomDetail>,
    pub total_count: i64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: i64,
}

impl RoomPage {
    pub fn new(rooms: Vec<RoomDetail>, total_count: i64, page: u32, page_size: u32) -> Self {
        Self {
            rooms,
            total_count,
            page,
            page_size,
            total_pages: total_pages(total_count, page_size),
        }
    }
}

fn total_pages(total_count: i64, page_size: u32) -> i64 {
    if page_size == 0 {
        return 0;
    }
    (total_count.max(0) as u64).div_ceil(u64::from(page_size)) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(42, 20), 3);
        assert_eq!(total_pages(-5, 20), 0);
        assert_eq!(total_pages(5, 0), 0);
        assert_eq!(total_pages(101, 100), 2);
    }

    #[test]
    fn test_serialize_camel_case() {
        let page = RoomPage::new(Vec::new(), 41, 2, 20);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalCount"], 41);
        assert_eq!(json["pageSize"], 20);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["rooms"].as_array().map(Vec::len), Some(0));
    }
}
