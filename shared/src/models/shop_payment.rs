//! Shop settlement (commission/payout) models

use serde::{Deserialize, Serialize};

use super::status::{PayoutStatus, PeriodType};

/// One commission settlement snapshot per (shop, period)
///
/// Unique on (shop_id, period_type, period_start, period_end); regenerating
/// an existing period is rejected, never overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ShopPayment {
    pub id: i64,
    pub shop_id: i64,
    pub period_type: PeriodType,
    /// Inclusive period bounds as `YYYY-MM-DD`
    pub period_start: String,
    pub period_end: String,
    pub total_sales: f64,
    /// Commission percentage applied at generation time
    pub commission_rate: f64,
    pub commission_amount: f64,
    pub payable_amount: f64,
    pub status: PayoutStatus,
    pub paid_amount: Option<f64>,
    pub payment_method: Option<String>,
    pub transaction_reference: Option<String>,
    pub notes: Option<String>,
    pub paid_at: Option<i64>,
    pub created_at: i64,
}

/// Generate-payments request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePaymentsRequest {
    pub period: PeriodType,
}

/// Summary returned by a generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePaymentsResult {
    pub period_type: PeriodType,
    pub period_start: String,
    pub period_end: String,
    pub shops_settled: u64,
}

/// Mark-paid request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkPaidRequest {
    pub payment_method: Option<String>,
    pub transaction_reference: Option<String>,
    pub notes: Option<String>,
}
