//! User Repository

use super::RepoResult;
use shared::models::User;
use sqlx::SqlitePool;

const USER_SELECT: &str = "SELECT id, username, password_hash, role, shop_id, name, email, phone, default_ship_name, default_ship_phone, default_ship_address, default_ship_city, default_ship_state, default_ship_pincode, created_at, updated_at FROM users";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE username = ?");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Insert a user (seeding and tests; self-service registration is out of scope)
pub async fn create(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    role: &str,
    shop_id: Option<i64>,
    name: &str,
) -> RepoResult<User> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO users (id, username, password_hash, role, shop_id, name, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(id)
    .bind(username)
    .bind(password_hash)
    .bind(role)
    .bind(shop_id)
    .bind(name)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| super::RepoError::Database("Failed to create user".into()))
}

/// Persist the customer's latest shipping details as their default address
///
/// Called after order placement; best-effort from the caller's perspective.
pub async fn update_default_address(
    pool: &SqlitePool,
    user_id: i64,
    ship: &shared::models::ShippingDetails,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query(
        "UPDATE users SET default_ship_name = ?1, default_ship_phone = ?2, default_ship_address = ?3, default_ship_city = ?4, default_ship_state = ?5, default_ship_pincode = ?6, updated_at = ?7 WHERE id = ?8",
    )
    .bind(&ship.full_name)
    .bind(&ship.phone)
    .bind(&ship.address)
    .bind(&ship.city)
    .bind(&ship.state)
    .bind(&ship.pincode)
    .bind(now)
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(())
}
