//! Order number generation
//!
//! Human-readable numbers: prefix + UTC date + four random digits, e.g.
//! `ORD202608260417`. Collisions are resolved by retrying against the
//! orders table; the UNIQUE column is the last line of defense.

use crate::db::repository::order as order_repo;
use rand::Rng;
use shared::{AppError, ErrorCode};
use sqlx::SqlitePool;

const MAX_ATTEMPTS: u32 = 20;

fn candidate(prefix: &str) -> String {
    let date = chrono::Utc::now().format("%Y%m%d");
    let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
    format!("{prefix}{date}{suffix:04}")
}

/// Generate an order number not yet present in the orders table
pub async fn generate(pool: &SqlitePool, prefix: &str) -> Result<String, AppError> {
    for _ in 0..MAX_ATTEMPTS {
        let number = candidate(prefix);
        if !order_repo::order_number_exists(pool, &number).await? {
            return Ok(number);
        }
    }
    Err(AppError::new(ErrorCode::OrderNumberExhausted))
}
