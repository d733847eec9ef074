//! Order Repository
//!
//! Row-level access for orders, line items and the status-history log.
//! Mutations that must be atomic take a `SqliteConnection` so the caller
//! can run them inside one transaction.

use super::RepoResult;
use shared::models::{Order, OrderItem, OrderStatus, OrderStatusHistory};
use sqlx::{SqliteConnection, SqlitePool};

const ORDER_SELECT: &str = "SELECT id, order_number, customer_id, subtotal, tax, shipping, total, status, payment_method, payment_status, ship_name, ship_phone, ship_address, ship_city, ship_state, ship_pincode, ship_email, tracking_number, created_at, updated_at, confirmed_at, shipped_at, delivered_at, cancelled_at FROM orders";

const ITEM_SELECT: &str = "SELECT id, order_id, shop_id, product_id, product_name, unit_price, size_label, quantity, subtotal, status, created_at, updated_at FROM order_items";

// ==================== Orders ====================

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_customer(pool: &SqlitePool, customer_id: i64) -> RepoResult<Vec<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE customer_id = ? ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Order>(&sql)
        .bind(customer_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Whether an order number is already taken (collision-retry loop)
pub async fn order_number_exists(pool: &SqlitePool, number: &str) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE order_number = ?")
        .bind(number)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Insert the order row (placement transaction)
pub async fn insert_order(conn: &mut SqliteConnection, order: &Order) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO orders (id, order_number, customer_id, subtotal, tax, shipping, total, status, payment_method, payment_status, ship_name, ship_phone, ship_address, ship_city, ship_state, ship_pincode, ship_email, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
    )
    .bind(order.id)
    .bind(&order.order_number)
    .bind(order.customer_id)
    .bind(order.subtotal)
    .bind(order.tax)
    .bind(order.shipping)
    .bind(order.total)
    .bind(order.status)
    .bind(order.payment_method)
    .bind(order.payment_status)
    .bind(&order.ship_name)
    .bind(&order.ship_phone)
    .bind(&order.ship_address)
    .bind(&order.ship_city)
    .bind(&order.ship_state)
    .bind(&order.ship_pincode)
    .bind(&order.ship_email)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(conn)
    .await?;
    Ok(())
}

/// Update the order's aggregate status, stamping the matching transition
/// timestamp (confirmed_at, shipped_at, delivered_at, cancelled_at)
pub async fn update_order_status(
    conn: &mut SqliteConnection,
    order_id: i64,
    status: OrderStatus,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let timestamp_column = match status {
        OrderStatus::Confirmed => Some("confirmed_at"),
        OrderStatus::Shipped => Some("shipped_at"),
        OrderStatus::Delivered => Some("delivered_at"),
        OrderStatus::Cancelled => Some("cancelled_at"),
        _ => None,
    };

    // Column name comes from the match above, never from input
    let sql = match timestamp_column {
        Some(col) => format!(
            "UPDATE orders SET status = ?1, updated_at = ?2, {col} = COALESCE({col}, ?2) WHERE id = ?3"
        ),
        None => "UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3".to_string(),
    };

    sqlx::query(&sql)
        .bind(status)
        .bind(now)
        .bind(order_id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Record a carrier tracking number (shipped transitions)
pub async fn set_tracking_number(
    conn: &mut SqliteConnection,
    order_id: i64,
    tracking_number: &str,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query("UPDATE orders SET tracking_number = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(tracking_number)
        .bind(now)
        .bind(order_id)
        .execute(conn)
        .await?;
    Ok(())
}

// ==================== Line items ====================

pub async fn insert_item(conn: &mut SqliteConnection, item: &OrderItem) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO order_items (id, order_id, shop_id, product_id, product_name, unit_price, size_label, quantity, subtotal, status, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
    )
    .bind(item.id)
    .bind(item.order_id)
    .bind(item.shop_id)
    .bind(item.product_id)
    .bind(&item.product_name)
    .bind(item.unit_price)
    .bind(&item.size_label)
    .bind(item.quantity)
    .bind(item.subtotal)
    .bind(item.status)
    .bind(item.created_at)
    .bind(item.updated_at)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn find_item_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderItem>> {
    let sql = format!("{ITEM_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_items_by_order(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let sql = format!("{ITEM_SELECT} WHERE order_id = ? ORDER BY id");
    let rows = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(order_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Line items belonging to a shop, newest orders first
pub async fn find_items_by_shop(pool: &SqlitePool, shop_id: i64) -> RepoResult<Vec<OrderItem>> {
    let sql = format!("{ITEM_SELECT} WHERE shop_id = ? ORDER BY created_at DESC, id");
    let rows = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(shop_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn update_item_status(
    conn: &mut SqliteConnection,
    item_id: i64,
    status: OrderStatus,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query("UPDATE order_items SET status = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(status)
        .bind(now)
        .bind(item_id)
        .execute(conn)
        .await?;
    Ok(())
}

/// All item statuses for an order, read inside the update transaction so the
/// aggregate is computed against a consistent snapshot
pub async fn item_statuses(
    conn: &mut SqliteConnection,
    order_id: i64,
) -> RepoResult<Vec<OrderStatus>> {
    let rows: Vec<(OrderStatus,)> =
        sqlx::query_as("SELECT status FROM order_items WHERE order_id = ?")
            .bind(order_id)
            .fetch_all(conn)
            .await?;
    Ok(rows.into_iter().map(|(s,)| s).collect())
}

// ==================== Status history ====================

/// Append one immutable status-history row
#[allow(clippy::too_many_arguments)]
pub async fn insert_history(
    conn: &mut SqliteConnection,
    order_id: i64,
    order_item_id: Option<i64>,
    from_status: OrderStatus,
    to_status: OrderStatus,
    actor_role: &str,
    actor_id: i64,
    note: Option<&str>,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO order_status_history (id, order_id, order_item_id, from_status, to_status, actor_role, actor_id, note, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(id)
    .bind(order_id)
    .bind(order_item_id)
    .bind(from_status)
    .bind(to_status)
    .bind(actor_role)
    .bind(actor_id)
    .bind(note)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn find_history(
    pool: &SqlitePool,
    order_id: i64,
) -> RepoResult<Vec<OrderStatusHistory>> {
    let rows = sqlx::query_as::<_, OrderStatusHistory>(
        "SELECT id, order_id, order_item_id, from_status, to_status, actor_role, actor_id, note, created_at FROM order_status_history WHERE order_id = ? ORDER BY created_at, id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
