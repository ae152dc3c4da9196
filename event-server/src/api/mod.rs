//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`rooms`] - 房间与床位分配接口

pub mod health;
pub mod rooms;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
