//! Shop Payment Repository
//!
//! Persistence for per-shop settlement records. The UNIQUE index on
//! (shop_id, period_type, period_start, period_end) is the final guard
//! against double generation; `exists_for_period` is only the fast path.

use super::RepoResult;
use shared::models::{PayoutStatus, PeriodType, ShopPayment};
use sqlx::{SqliteConnection, SqlitePool};

const PAYMENT_SELECT: &str = "SELECT id, shop_id, period_type, period_start, period_end, total_sales, commission_rate, commission_amount, payable_amount, status, paid_amount, payment_method, transaction_reference, notes, paid_at, created_at FROM shop_payments";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<ShopPayment>> {
    let sql = format!("{PAYMENT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, ShopPayment>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<ShopPayment>> {
    let sql = format!("{PAYMENT_SELECT} ORDER BY created_at DESC, id");
    let rows = sqlx::query_as::<_, ShopPayment>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Whether any settlement rows already exist for the period
pub async fn exists_for_period(
    pool: &SqlitePool,
    period_type: PeriodType,
    period_start: &str,
    period_end: &str,
) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM shop_payments WHERE period_type = ? AND period_start = ? AND period_end = ?",
    )
    .bind(period_type.as_str())
    .bind(period_start)
    .bind(period_end)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// Insert one settlement row inside the generation transaction
pub async fn insert(conn: &mut SqliteConnection, payment: &ShopPayment) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO shop_payments (id, shop_id, period_type, period_start, period_end, total_sales, commission_rate, commission_amount, payable_amount, status, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    )
    .bind(payment.id)
    .bind(payment.shop_id)
    .bind(payment.period_type)
    .bind(&payment.period_start)
    .bind(&payment.period_end)
    .bind(payment.total_sales)
    .bind(payment.commission_rate)
    .bind(payment.commission_amount)
    .bind(payment.payable_amount)
    .bind(payment.status)
    .bind(payment.created_at)
    .execute(conn)
    .await?;
    Ok(())
}

/// Flip an unpaid settlement to paid, recording the disbursement details.
/// Returns false when the row was already paid (the guard clause in the
/// WHERE keeps the flip idempotent-safe under races).
#[allow(clippy::too_many_arguments)]
pub async fn mark_paid(
    pool: &SqlitePool,
    id: i64,
    paid_amount: f64,
    payment_method: &str,
    transaction_reference: Option<&str>,
    notes: Option<&str>,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "UPDATE shop_payments SET status = ?1, paid_amount = ?2, payment_method = ?3, transaction_reference = ?4, notes = ?5, paid_at = ?6 WHERE id = ?7 AND status = ?8",
    )
    .bind(PayoutStatus::Paid)
    .bind(paid_amount)
    .bind(payment_method)
    .bind(transaction_reference)
    .bind(notes)
    .bind(now)
    .bind(id)
    .bind(PayoutStatus::Unpaid)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Delivered sales per shop within a millisecond window, keyed by shop id.
///
/// Each line item counts by its own status: a delivered item settles even
/// while a sibling lags, and a cancelled item never does. The parent order
/// only supplies the period window (placement time); the window is
/// inclusive of start and exclusive of end.
pub async fn delivered_sales_by_shop(
    pool: &SqlitePool,
    start_ms: i64,
    end_ms: i64,
) -> RepoResult<Vec<(i64, f64)>> {
    let rows: Vec<(i64, f64)> = sqlx::query_as(
        "SELECT oi.shop_id, SUM(oi.subtotal) FROM order_items oi \
         JOIN orders o ON o.id = oi.order_id \
         WHERE oi.status = 'delivered' AND o.created_at >= ? AND o.created_at < ? \
         GROUP BY oi.shop_id",
    )
    .bind(start_ms)
    .bind(end_ms)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
