//! Order and line item models

use serde::{Deserialize, Serialize};

use super::status::{OrderStatus, PaymentMethod, PaymentStatus};

/// Order entity
///
/// The shipping block is a snapshot copied at placement time; later edits to
/// the customer profile never alter historical orders. Money fields are
/// computed server-side from the live catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub customer_id: i64,
    pub subtotal: f64,
    pub tax: f64,
    pub shipping: f64,
    pub total: f64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub ship_name: String,
    pub ship_phone: String,
    pub ship_address: String,
    pub ship_city: String,
    pub ship_state: String,
    pub ship_pincode: String,
    pub ship_email: Option<String>,
    pub tracking_number: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub confirmed_at: Option<i64>,
    pub shipped_at: Option<i64>,
    pub delivered_at: Option<i64>,
    pub cancelled_at: Option<i64>,
}

/// Line item entity
///
/// Product name, unit price and size are denormalized at purchase time so
/// catalog edits do not rewrite history. Each item is fulfilled by its shop
/// independently of its siblings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub shop_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub unit_price: f64,
    pub size_label: Option<String>,
    pub quantity: i64,
    pub subtotal: f64,
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Append-only status transition log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderStatusHistory {
    pub id: i64,
    pub order_id: i64,
    pub order_item_id: Option<i64>,
    pub from_status: OrderStatus,
    pub to_status: OrderStatus,
    pub actor_role: String,
    pub actor_id: i64,
    pub note: Option<String>,
    pub created_at: i64,
}

/// Order with its line items (detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

// ==================== Request / response payloads ====================

/// Shipping details submitted at placement; all fields except email required
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub email: Option<String>,
}

/// One requested cart line: product id, quantity, optional size label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub id: i64,
    pub quantity: i64,
    pub size: Option<String>,
}

/// Place-order request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub shipping: ShippingDetails,
    pub items: Vec<CartLine>,
    pub payment_method: PaymentMethod,
}

/// Place-order response payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub order_id: i64,
    pub order_number: String,
    pub total: f64,
}

/// Shop actor item-status update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemStatusUpdate {
    pub status: OrderStatus,
    pub note: Option<String>,
}

/// Admin order-status override; cascades to all child items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminOrderStatusUpdate {
    pub status: OrderStatus,
    pub tracking_number: Option<String>,
    pub note: Option<String>,
}
