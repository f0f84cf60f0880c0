use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::order::{CreateOrderRequest, Order, OrderStatus};
use shared::response::ApiResponse;

use crate::core::ServerState;
use crate::orders::OrderCounts;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// POST /api/orders
///
/// Admit a new order. Fails with 409 if the table already has a live
/// order, 422 if a line references an unknown menu item.
pub async fn create(
    State(state): State<ServerState>,
    Json(request): Json<CreateOrderRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    // The commit fsyncs; keep it off the async workers
    let admission = state.admission.clone();
    let order = tokio::task::spawn_blocking(move || admission.admit(request))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(Json(ApiResponse::ok_with_message(order, "Order created")))
}

/// GET /api/orders?status=NEW
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let orders = state.query.list(params.status)?;
    Ok(Json(ApiResponse::ok(orders)))
}

/// GET /api/orders/counts
pub async fn counts(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<OrderCounts>>> {
    let counts = state.query.counts()?;
    Ok(Json(ApiResponse::ok(counts)))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state.query.get(&id)?;
    Ok(Json(ApiResponse::ok(order)))
}

/// PUT /api/orders/{id}/status
///
/// Advance the order along NEW -> PAID -> DONE. Setting the current
/// status again is accepted and changes nothing.
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let lifecycle = state.lifecycle.clone();
    let order = tokio::task::spawn_blocking(move || lifecycle.transition(&id, request.status))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    let message = format!("Order status updated to {}", order.status);
    Ok(Json(ApiResponse::ok_with_message(order, message)))
}
