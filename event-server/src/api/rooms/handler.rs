//! Room API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{
    AssignRequest, AssignmentResult, GuestPlacement, RoomCreate, RoomDetail, RoomUpdate,
    UnassignRequest,
};
use shared::request::{GuestListQuery, RoomListQuery};
use shared::response::RoomPage;

/// GET /api/events/:event_id/rooms - 获取房间列表 (分页、分类筛选、搜索)
pub async fn list(
    State(state): State<ServerState>,
    Path(event_id): Path<i64>,
    Query(query): Query<RoomListQuery>,
) -> AppResult<Json<RoomPage>> {
    let page = state.rooms.list_rooms(event_id, &query).await?;
    Ok(Json(page))
}

/// GET /api/events/:event_id/rooms/categories - 获取房型分类
pub async fn list_categories(
    State(state): State<ServerState>,
    Path(event_id): Path<i64>,
) -> AppResult<Json<Vec<String>>> {
    let categories = state.rooms.list_categories(event_id).await?;
    Ok(Json(categories))
}

/// GET /api/events/:event_id/rooms/guests - 获取宾客及其分配情况
pub async fn list_guests(
    State(state): State<ServerState>,
    Path(event_id): Path<i64>,
    Query(query): Query<GuestListQuery>,
) -> AppResult<Json<Vec<GuestPlacement>>> {
    let guests = state.rooms.list_guests(event_id, &query).await?;
    Ok(Json(guests))
}

/// GET /api/events/:event_id/rooms/:room_id - 获取单个房间
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((event_id, room_id)): Path<(i64, i64)>,
) -> AppResult<Json<RoomDetail>> {
    let room = state.rooms.get_room(event_id, room_id).await?;
    Ok(Json(room))
}

/// POST /api/events/:event_id/rooms - 创建房间
pub async fn create(
    State(state): State<ServerState>,
    Path(event_id): Path<i64>,
    Json(payload): Json<RoomCreate>,
) -> AppResult<Json<RoomDetail>> {
    let room = state.rooms.create_room(event_id, payload).await?;
    Ok(Json(room))
}

/// PATCH /api/events/:event_id/rooms/:room_id - 更新房间
pub async fn update(
    State(state): State<ServerState>,
    Path((event_id, room_id)): Path<(i64, i64)>,
    Json(payload): Json<RoomUpdate>,
) -> AppResult<Json<RoomDetail>> {
    let room = state.rooms.update_room(event_id, room_id, payload).await?;
    Ok(Json(room))
}

/// DELETE /api/events/:event_id/rooms/:room_id - 删除房间 (连同床位分配)
pub async fn delete(
    State(state): State<ServerState>,
    Path((event_id, room_id)): Path<(i64, i64)>,
) -> AppResult<Json<bool>> {
    let deleted = state.rooms.delete_room(event_id, room_id).await?;
    Ok(Json(deleted))
}

/// POST /api/events/:event_id/rooms/assign - 分配/移动/清空床位
pub async fn assign(
    State(state): State<ServerState>,
    Path(event_id): Path<i64>,
    Json(payload): Json<AssignRequest>,
) -> AppResult<Json<AssignmentResult>> {
    let result = state.rooms.assign(event_id, payload).await?;
    Ok(Json(result))
}

/// DELETE /api/events/:event_id/rooms/:room_id/unassign - 清空床位
pub async fn unassign(
    State(state): State<ServerState>,
    Path((event_id, room_id)): Path<(i64, i64)>,
    Json(payload): Json<UnassignRequest>,
) -> AppResult<Json<AssignmentResult>> {
    let result = state.rooms.unassign(event_id, room_id, payload.slot).await?;
    Ok(Json(result))
}
