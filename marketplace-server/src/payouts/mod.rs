//! Commission settlement
//!
//! Batch generation of per-shop payout records over a daily or weekly
//! period, and the admin mark-paid flow. A period is settled at most once:
//! an application pre-check gives the friendly error, the unique index on
//! (shop_id, period_type, period_start, period_end) closes the race.

use chrono::{Days, NaiveDate, Utc, Weekday};
use rust_decimal::Decimal;
use shared::models::{
    GeneratePaymentsResult, MarkPaidRequest, PayoutStatus, PeriodType, ShopPayment,
};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;
use tracing::info;

use crate::db::repository::{settings, shop_payment as payment_repo};
use crate::orders::pricing;

/// A settlement period with inclusive date bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub period_type: PeriodType,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    /// The period containing `today`: the day itself, or its ISO week
    /// (Monday through Sunday)
    pub fn containing(period_type: PeriodType, today: NaiveDate) -> Self {
        let (start, end) = match period_type {
            PeriodType::Daily => (today, today),
            PeriodType::Weekly => {
                let week = today.week(Weekday::Mon);
                (week.first_day(), week.last_day())
            }
        };
        Self {
            period_type,
            start,
            end,
        }
    }

    pub fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }

    /// Millisecond window [start of first day, start of day after last day)
    pub fn window_ms(&self) -> (i64, i64) {
        let start = self.start.and_hms_opt(0, 0, 0).unwrap_or_default();
        let end = (self.end + Days::new(1))
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default();
        (
            start.and_utc().timestamp_millis(),
            end.and_utc().timestamp_millis(),
        )
    }
}

/// Commission split for a shop's sales at the given percentage rate
pub fn settle(total_sales: f64, commission_rate: f64) -> (f64, f64) {
    let sales = pricing::to_decimal(total_sales);
    let rate = pricing::to_decimal(commission_rate) / Decimal::ONE_HUNDRED;
    let commission = pricing::round2(sales * rate);
    let payable = pricing::round2(sales - commission);
    (pricing::to_f64(commission), pricing::to_f64(payable))
}

/// Generate settlement records for the current period of the given type.
///
/// Sums delivered sales per shop and writes one unpaid ShopPayment row for
/// each shop with sales; shops with nothing delivered get no row.
pub async fn generate_payments(
    pool: &SqlitePool,
    period_type: PeriodType,
) -> AppResult<GeneratePaymentsResult> {
    let period = Period::containing(period_type, Utc::now().date_naive());
    generate_for_period(pool, period).await
}

/// Generation against an explicit period (exposed for tests)
pub async fn generate_for_period(
    pool: &SqlitePool,
    period: Period,
) -> AppResult<GeneratePaymentsResult> {
    let period_start = period.start_str();
    let period_end = period.end_str();

    if payment_repo::exists_for_period(pool, period.period_type, &period_start, &period_end)
        .await?
    {
        return Err(AppError::new(ErrorCode::PeriodAlreadyGenerated)
            .with_detail("period_start", period_start)
            .with_detail("period_end", period_end));
    }

    let rate = settings::commission_rate(pool).await?;
    let (window_start, window_end) = period.window_ms();
    let sales = payment_repo::delivered_sales_by_shop(pool, window_start, window_end).await?;

    let now = shared::util::now_millis();
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    let mut settled = 0u64;
    for (shop_id, total_sales) in &sales {
        let (commission_amount, payable_amount) = settle(*total_sales, rate);
        let payment = ShopPayment {
            id: shared::util::snowflake_id(),
            shop_id: *shop_id,
            period_type: period.period_type,
            period_start: period_start.clone(),
            period_end: period_end.clone(),
            total_sales: *total_sales,
            commission_rate: rate,
            commission_amount,
            payable_amount,
            status: PayoutStatus::Unpaid,
            paid_amount: None,
            payment_method: None,
            transaction_reference: None,
            notes: None,
            paid_at: None,
            created_at: now,
        };
        payment_repo::insert(&mut *tx, &payment).await.map_err(|e| {
            // Concurrent generation lost the race on the unique index
            match e {
                crate::db::repository::RepoError::Duplicate(_) => {
                    AppError::new(ErrorCode::PeriodAlreadyGenerated)
                }
                other => other.into(),
            }
        })?;
        settled += 1;
    }
    tx.commit()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    info!(
        period_type = period.period_type.as_str(),
        period_start = %period_start,
        period_end = %period_end,
        shops_settled = settled,
        "Settlement batch generated"
    );

    Ok(GeneratePaymentsResult {
        period_type: period.period_type,
        period_start,
        period_end,
        shops_settled: settled,
    })
}

/// Mark an unpaid settlement as disbursed.
///
/// The paid amount is always the stored payable amount; the request only
/// supplies how it was paid. Re-marking a paid record is a conflict.
pub async fn mark_paid(
    pool: &SqlitePool,
    payment_id: i64,
    request: &MarkPaidRequest,
) -> AppResult<ShopPayment> {
    let payment = payment_repo::find_by_id(pool, payment_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PaymentNotFound))?;
    if payment.status == PayoutStatus::Paid {
        return Err(AppError::new(ErrorCode::PaymentAlreadyPaid));
    }

    let method = request.payment_method.as_deref().unwrap_or("manual");
    let flipped = payment_repo::mark_paid(
        pool,
        payment_id,
        payment.payable_amount,
        method,
        request.transaction_reference.as_deref(),
        request.notes.as_deref(),
    )
    .await?;
    if !flipped {
        // Another admin got there first
        return Err(AppError::new(ErrorCode::PaymentAlreadyPaid));
    }

    info!(
        payment_id,
        shop_id = payment.shop_id,
        amount = payment.payable_amount,
        "Settlement marked paid"
    );

    payment_repo::find_by_id(pool, payment_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PaymentNotFound))
}
