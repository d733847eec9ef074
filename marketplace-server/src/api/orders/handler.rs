//! Customer order handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::order as order_repo;
use crate::orders::placement;
use shared::models::{Order, OrderPlaced, OrderWithItems, PlaceOrderRequest};
use shared::{ApiResponse, AppError, AppResult, ErrorCode};

/// Place a new order from the submitted cart
pub async fn place_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<PlaceOrderRequest>,
) -> AppResult<Json<ApiResponse<OrderPlaced>>> {
    let placed = placement::place_order(&state, &user, payload).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Order placed successfully",
        placed,
    )))
}

/// List the authenticated customer's orders, newest first
pub async fn list_own(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let orders = order_repo::find_by_customer(&state.pool, user.id).await?;
    Ok(Json(ApiResponse::ok(orders)))
}

/// Fetch one order with its items; owner or admin only.
///
/// Orders belonging to someone else read as missing.
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let order = order_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    if order.customer_id != user.id && !user.is_admin() {
        return Err(AppError::new(ErrorCode::OrderNotFound));
    }
    let items = order_repo::find_items_by_order(&state.pool, id).await?;
    Ok(Json(ApiResponse::ok(OrderWithItems { order, items })))
}
