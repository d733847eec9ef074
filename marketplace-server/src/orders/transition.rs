//! Status transition workflows
//!
//! Applies a shop item-status update or an admin order-status override in
//! one transaction: item rows, the recomputed order status, transition
//! timestamps and the append-only history log all move together.

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::order as order_repo;
use crate::orders::status;
use crate::utils::validation::{self, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN};
use shared::models::{AdminOrderStatusUpdate, ItemStatusUpdate, Order, OrderItem};
use shared::{AppError, AppResult, ErrorCode};
use tracing::info;

/// Shop actor advances (or cancels) one of their own line items.
///
/// Items not owned by the actor's shop are reported as missing, not as
/// forbidden, so shops cannot probe other shops' items.
pub async fn update_item_status(
    state: &ServerState,
    actor: &CurrentUser,
    item_id: i64,
    update: ItemStatusUpdate,
) -> AppResult<OrderItem> {
    validation::validate_optional_text(&update.note, "note", MAX_NOTE_LEN)?;

    let item = order_repo::find_item_by_id(&state.pool, item_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderItemNotFound))?;
    if !actor.is_admin() && actor.shop_id != Some(item.shop_id) {
        return Err(AppError::new(ErrorCode::OrderItemNotFound));
    }

    status::validate_shop_transition(item.status, update.status)?;

    let order = order_repo::find_by_id(&state.pool, item.order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    let mut tx = state
        .pool
        .begin()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    order_repo::update_item_status(&mut *tx, item.id, update.status).await?;
    order_repo::insert_history(
        &mut *tx,
        order.id,
        Some(item.id),
        item.status,
        update.status,
        actor.role.as_str(),
        actor.id,
        update.note.as_deref(),
    )
    .await?;

    let statuses = order_repo::item_statuses(&mut *tx, order.id).await?;
    let aggregate = status::aggregate(&statuses);
    let mut order_status_changed = None;
    if let Some(new_status) = aggregate
        && new_status != order.status
    {
        order_repo::update_order_status(&mut *tx, order.id, new_status).await?;
        order_repo::insert_history(
            &mut *tx,
            order.id,
            None,
            order.status,
            new_status,
            actor.role.as_str(),
            actor.id,
            None,
        )
        .await?;
        order_status_changed = Some(new_status);
    }

    tx.commit()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    info!(
        item_id = item.id,
        order_id = order.id,
        from = item.status.as_str(),
        to = update.status.as_str(),
        order_status = order_status_changed.map(|s| s.as_str()),
        "Item status updated"
    );

    if let Some(new_status) = order_status_changed {
        state.notifier.order_status_changed(&order, new_status).await;
    }

    order_repo::find_item_by_id(&state.pool, item.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderItemNotFound))
}

/// Admin sets an order to any recognized status, cascading to every item.
pub async fn admin_update_order_status(
    state: &ServerState,
    actor: &CurrentUser,
    order_id: i64,
    update: AdminOrderStatusUpdate,
) -> AppResult<Order> {
    validation::validate_optional_text(&update.note, "note", MAX_NOTE_LEN)?;
    validation::validate_optional_text(
        &update.tracking_number,
        "tracking_number",
        MAX_SHORT_TEXT_LEN,
    )?;

    let order = order_repo::find_by_id(&state.pool, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    let items = order_repo::find_items_by_order(&state.pool, order_id).await?;

    let mut tx = state
        .pool
        .begin()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    for item in &items {
        if item.status == update.status {
            continue;
        }
        order_repo::update_item_status(&mut *tx, item.id, update.status).await?;
        order_repo::insert_history(
            &mut *tx,
            order.id,
            Some(item.id),
            item.status,
            update.status,
            actor.role.as_str(),
            actor.id,
            update.note.as_deref(),
        )
        .await?;
    }

    if order.status != update.status {
        order_repo::update_order_status(&mut *tx, order.id, update.status).await?;
        order_repo::insert_history(
            &mut *tx,
            order.id,
            None,
            order.status,
            update.status,
            actor.role.as_str(),
            actor.id,
            update.note.as_deref(),
        )
        .await?;
    }

    if let Some(tracking) = update.tracking_number.as_deref() {
        order_repo::set_tracking_number(&mut *tx, order.id, tracking).await?;
    }

    tx.commit()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    info!(
        order_id = order.id,
        from = order.status.as_str(),
        to = update.status.as_str(),
        items = items.len(),
        "Order status overridden"
    );

    if order.status != update.status {
        state.notifier.order_status_changed(&order, update.status).await;
    }

    order_repo::find_by_id(&state.pool, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))
}
