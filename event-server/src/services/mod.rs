//! 业务服务层
//!
//! - [`RoomAssignmentService`] - 房间与床位分配规则

pub mod room_assignment;

pub use room_assignment::RoomAssignmentService;
