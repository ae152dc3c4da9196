use crate::core::{Config, Result};
use crate::db::DbService;
use crate::services::RoomAssignmentService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是廉价克隆 (连接池内部为 Arc)，通过 axum `State` 显式传递给处理器，
/// 不存在全局可变状态。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | rooms | RoomAssignmentService | 房间分配服务 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库服务
    pub db: DbService,
    /// 房间分配服务
    pub rooms: RoomAssignmentService,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 代替
    pub fn new(config: Config, db: DbService) -> Self {
        let rooms = RoomAssignmentService::new(db.pool.clone());
        Self { config, db, rooms }
    }

    /// 打开数据库、执行迁移并组装服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_path, config.db_max_connections).await?;
        Ok(Self::new(config.clone(), db))
    }
}
