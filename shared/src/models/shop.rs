//! Shop model

use serde::{Deserialize, Serialize};

/// Shop entity
///
/// Products from a closed shop are silently dropped at order placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Shop {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub is_open: bool,
    pub created_at: i64,
}
