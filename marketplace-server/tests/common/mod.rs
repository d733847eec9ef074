//! Shared test fixtures: in-memory database, seeded users, shops, products.
#![allow(dead_code)]

use marketplace_server::db::DbService;
use marketplace_server::db::repository::{
    product as product_repo, shop as shop_repo, user as user_repo,
};
use marketplace_server::{Config, CurrentUser, Role, ServerState};
use shared::models::{CartLine, PlaceOrderRequest, Product, ShippingDetails};
use shared::models::PaymentMethod;
use sqlx::sqlite::SqlitePoolOptions;

/// Fresh state over an in-memory database with migrations applied.
///
/// One connection only: each `sqlite::memory:` connection is its own
/// database, so pooling more would lose the schema.
pub async fn test_state() -> ServerState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    DbService::migrate(&pool).await.expect("migrations");
    let config = Config::with_overrides("/tmp", ":memory:", 0);
    ServerState::for_tests(config, pool)
}

pub async fn seed_customer(state: &ServerState, username: &str) -> CurrentUser {
    let user = user_repo::create(&state.pool, username, "x", "customer", None, username)
        .await
        .expect("seed customer");
    CurrentUser {
        id: user.id,
        username: user.username,
        role: Role::Customer,
        shop_id: None,
    }
}

/// A shop plus the operator acting for it
pub async fn seed_shop(state: &ServerState, name: &str) -> (i64, CurrentUser) {
    let owner = user_repo::create(
        &state.pool,
        &format!("{name}-owner"),
        "x",
        "shop",
        None,
        name,
    )
    .await
    .expect("seed shop owner");
    let shop = shop_repo::create(&state.pool, owner.id, name)
        .await
        .expect("seed shop");
    let actor = CurrentUser {
        id: owner.id,
        username: owner.username,
        role: Role::Shop,
        shop_id: Some(shop.id),
    };
    (shop.id, actor)
}

pub async fn seed_admin(state: &ServerState) -> CurrentUser {
    let user = user_repo::create(&state.pool, "admin", "x", "admin", None, "Admin")
        .await
        .expect("seed admin");
    CurrentUser {
        id: user.id,
        username: user.username,
        role: Role::Admin,
        shop_id: None,
    }
}

pub async fn seed_product(state: &ServerState, shop_id: i64, name: &str, price: f64) -> Product {
    product_repo::create(&state.pool, shop_id, name, price, true)
        .await
        .expect("seed product")
}

pub async fn seed_variant(state: &ServerState, product_id: i64, label: &str, adjustment: f64) {
    product_repo::create_variant(&state.pool, product_id, label, adjustment, 100)
        .await
        .expect("seed variant");
}

pub fn shipping() -> ShippingDetails {
    ShippingDetails {
        full_name: "Asha Rao".into(),
        phone: "9876543210".into(),
        address: "12 MG Road".into(),
        city: "Bengaluru".into(),
        state: "Karnataka".into(),
        pincode: "560001".into(),
        email: Some("asha@example.com".into()),
    }
}

pub fn order_request(items: Vec<CartLine>) -> PlaceOrderRequest {
    PlaceOrderRequest {
        shipping: shipping(),
        items,
        payment_method: PaymentMethod::CashOnDelivery,
    }
}

pub fn line(product_id: i64, quantity: i64, size: Option<&str>) -> CartLine {
    CartLine {
        id: product_id,
        quantity,
        size: size.map(Into::into),
    }
}
