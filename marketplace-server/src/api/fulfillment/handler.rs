//! Shop fulfillment handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::order as order_repo;
use crate::orders::transition;
use shared::models::{ItemStatusUpdate, OrderItem};
use shared::{ApiResponse, AppError, AppResult};

/// List line items routed to the actor's shop, newest first
pub async fn list_shop_items(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<OrderItem>>>> {
    let shop_id = user
        .shop_id
        .ok_or_else(|| AppError::forbidden("No shop associated with this account"))?;
    let items = order_repo::find_items_by_shop(&state.pool, shop_id).await?;
    Ok(Json(ApiResponse::ok(items)))
}

/// Advance or cancel one of the shop's line items
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ItemStatusUpdate>,
) -> AppResult<Json<ApiResponse<OrderItem>>> {
    let item = transition::update_item_status(&state, &user, id, payload).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Item status updated",
        item,
    )))
}
