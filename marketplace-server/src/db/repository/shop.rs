//! Shop Repository

use super::RepoResult;
use shared::models::Shop;
use sqlx::SqlitePool;

const SHOP_SELECT: &str = "SELECT id, owner_id, name, is_open, created_at FROM shops";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Shop>> {
    let sql = format!("{SHOP_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Shop>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, owner_id: i64, name: &str) -> RepoResult<Shop> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query("INSERT INTO shops (id, owner_id, name, is_open, created_at) VALUES (?1, ?2, ?3, 1, ?4)")
        .bind(id)
        .bind(owner_id)
        .bind(name)
        .bind(now)
        .execute(pool)
        .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| super::RepoError::Database("Failed to create shop".into()))
}

pub async fn set_open(pool: &SqlitePool, id: i64, is_open: bool) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE shops SET is_open = ? WHERE id = ?")
        .bind(is_open)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
