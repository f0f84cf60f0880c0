use axum::{Json, extract::State};
use shared::models::MenuItem;
use shared::response::ApiResponse;

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/menu
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<MenuItem>>>> {
    Ok(Json(ApiResponse::ok(state.catalog.list())))
}
