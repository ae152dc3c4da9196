//! Room API 模块
//!
//! 所有路由都挂在 `/api/events/{event_id}/rooms` 之下，活动 ID 由路径显式传入。

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/events/{event_id}/rooms", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/categories", get(handler::list_categories))
        .route("/guests", get(handler::list_guests))
        .route("/assign", post(handler::assign))
        .route(
            "/{room_id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .route("/{room_id}/unassign", delete(handler::unassign))
}
