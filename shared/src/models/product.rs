//! Product and size variant models

use serde::{Deserialize, Serialize};

/// Product entity
///
/// `total_orders` is a lifetime purchase counter used for popularity sorting,
/// not an inventory figure; stock lives on the size variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub shop_id: i64,
    pub name: String,
    pub price: f64,
    pub is_active: bool,
    pub total_orders: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Named size variant with an independent stock count and price adjustment
/// (positive or negative) added to the product's base price when selected
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SizeVariant {
    pub id: i64,
    pub product_id: i64,
    pub label: String,
    pub price_adjustment: f64,
    pub stock: i64,
}
