//! Product Repository

use super::RepoResult;
use shared::models::{Product, SizeVariant};
use sqlx::{SqliteConnection, SqlitePool};

const PRODUCT_SELECT: &str = "SELECT id, shop_id, name, price, is_active, total_orders, created_at, updated_at FROM products";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Find a product only if it can currently be purchased: the product is
/// active and its shop is open. Anything else is treated as absent, which
/// the placement workflow turns into a silently dropped cart line.
pub async fn find_purchasable(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!(
        "{} WHERE products.id = ? AND products.is_active = 1 AND EXISTS (SELECT 1 FROM shops s WHERE s.id = products.shop_id AND s.is_open = 1)",
        PRODUCT_SELECT
    );
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Look up a size variant by label for a product
pub async fn find_variant(
    pool: &SqlitePool,
    product_id: i64,
    label: &str,
) -> RepoResult<Option<SizeVariant>> {
    let row = sqlx::query_as::<_, SizeVariant>(
        "SELECT id, product_id, label, price_adjustment, stock FROM product_size_variants WHERE product_id = ? AND label = ?",
    )
    .bind(product_id)
    .bind(label)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Bump the lifetime order counter by the purchased quantity
///
/// Runs inside the placement transaction. This counter feeds popularity
/// sorting; it is not a stock reservation.
pub async fn increment_total_orders(
    conn: &mut SqliteConnection,
    product_id: i64,
    quantity: i64,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query("UPDATE products SET total_orders = total_orders + ?1, updated_at = ?2 WHERE id = ?3")
        .bind(quantity)
        .bind(now)
        .bind(product_id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn create(
    pool: &SqlitePool,
    shop_id: i64,
    name: &str,
    price: f64,
    is_active: bool,
) -> RepoResult<Product> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO products (id, shop_id, name, price, is_active, total_orders, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?6)",
    )
    .bind(id)
    .bind(shop_id)
    .bind(name)
    .bind(price)
    .bind(is_active)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| super::RepoError::Database("Failed to create product".into()))
}

pub async fn create_variant(
    pool: &SqlitePool,
    product_id: i64,
    label: &str,
    price_adjustment: f64,
    stock: i64,
) -> RepoResult<SizeVariant> {
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO product_size_variants (id, product_id, label, price_adjustment, stock) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(product_id)
    .bind(label)
    .bind(price_adjustment)
    .bind(stock)
    .execute(pool)
    .await?;
    let row = sqlx::query_as::<_, SizeVariant>(
        "SELECT id, product_id, label, price_adjustment, stock FROM product_size_variants WHERE id = ?",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}
