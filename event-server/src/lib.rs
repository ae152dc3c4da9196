//! Event Server - 活动房间分配服务
//!
//! # 架构概述
//!
//! 为活动管理后台提供房间/床位分配 API：
//!
//! - **数据库** (`db`): 嵌入式 SQLite (sqlx)，迁移随二进制发布
//! - **业务服务** (`services`): 房间 CRUD 与床位分配规则，每次写操作一个事务
//! - **HTTP API** (`api`): `/api/events/{event_id}/rooms` 下的 RESTful 接口
//!
//! # 模块结构
//!
//! ```text
//! event-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── db/            # 连接池、迁移、仓储
//! ├── services/      # 房间分配服务
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 路由组装与中间件栈
//! ├── middleware/    # 请求日志
//! └── utils/         # 日志、校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use db::DbService;
pub use routes::{build_app, build_router};
pub use services::RoomAssignmentService;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// 设置运行环境: 加载 `.env`、初始化日志
pub fn setup_environment() -> anyhow::Result<Config> {
    // .env 文件可选
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    init_logger_with_file(
        &config.log_level,
        config.is_production(),
        config.log_dir.as_deref(),
    )?;
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ____
   / __ \____  ____  ____ ___  _____
  / /_/ / __ \/ __ \/ __ `__ \/ ___/
 / _, _/ /_/ / /_/ / / / / / (__  )
/_/ |_|\____/\____/_/ /_/ /_/____/
    "#
    );
}
