//! User model (customers, shop owners, platform admins)

use serde::{Deserialize, Serialize};

/// User entity
///
/// `role` is one of `customer`, `shop`, `admin`; shop users carry the id of
/// the shop they operate. The `default_ship_*` columns hold the customer's
/// last used shipping address for pre-filling future orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub shop_id: Option<i64>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub default_ship_name: Option<String>,
    pub default_ship_phone: Option<String>,
    pub default_ship_address: Option<String>,
    pub default_ship_city: Option<String>,
    pub default_ship_state: Option<String>,
    pub default_ship_pincode: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub role: String,
    pub shop_id: Option<i64>,
}
