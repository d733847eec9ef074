//! Platform Settings Repository
//!
//! Key/value settings stored as text. Numeric settings are parsed on read
//! with a hard-coded fallback so a bad value never blocks payouts.

use super::RepoResult;
use sqlx::SqlitePool;

const DEFAULT_COMMISSION_RATE: f64 = 10.0;

pub async fn get(pool: &SqlitePool, key: &str) -> RepoResult<Option<String>> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT value FROM platform_settings WHERE key = ?")
            .bind(key)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(|(v,)| v))
}

pub async fn set(pool: &SqlitePool, key: &str, value: &str) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO platform_settings (key, value) VALUES (?1, ?2) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;
    Ok(())
}

/// Platform commission percentage, falling back to 10% when unset or
/// unparseable
pub async fn commission_rate(pool: &SqlitePool) -> RepoResult<f64> {
    let raw = get(pool, "commission_rate").await?;
    let rate = raw
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(DEFAULT_COMMISSION_RATE);
    Ok(rate)
}
