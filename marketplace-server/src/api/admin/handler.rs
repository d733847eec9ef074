//! Admin handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::shop_payment as payment_repo;
use crate::orders::transition;
use crate::payouts;
use shared::models::{
    AdminOrderStatusUpdate, GeneratePaymentsRequest, GeneratePaymentsResult, MarkPaidRequest,
    Order, ShopPayment,
};
use shared::{ApiResponse, AppResult};

/// Set an order to any recognized status, cascading to its items
pub async fn update_order_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<AdminOrderStatusUpdate>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = transition::admin_update_order_status(&state, &user, id, payload).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Order status updated",
        order,
    )))
}

/// List all settlement records, newest first
pub async fn list_payments(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<ShopPayment>>>> {
    let payments = payment_repo::find_all(&state.pool).await?;
    Ok(Json(ApiResponse::ok(payments)))
}

/// Generate settlement records for the current daily or weekly period
pub async fn generate_payments(
    State(state): State<ServerState>,
    Json(payload): Json<GeneratePaymentsRequest>,
) -> AppResult<Json<ApiResponse<GeneratePaymentsResult>>> {
    let result = payouts::generate_payments(&state.pool, payload.period).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Settlement batch generated",
        result,
    )))
}

/// Mark an unpaid settlement as disbursed
pub async fn mark_paid(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MarkPaidRequest>,
) -> AppResult<Json<ApiResponse<ShopPayment>>> {
    let payment = payouts::mark_paid(&state.pool, id, &payload).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Settlement marked paid",
        payment,
    )))
}
