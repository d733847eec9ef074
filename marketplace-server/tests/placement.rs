//! Order placement against an in-memory database

mod common;

use marketplace_server::db::repository::{order as order_repo, product as product_repo};
use marketplace_server::orders::{number, placement};
use marketplace_server::ErrorCode;
use shared::models::OrderStatus;

#[tokio::test]
async fn placing_an_order_prices_from_the_catalog() {
    let state = common::test_state().await;
    let (shop_id, _) = common::seed_shop(&state, "pizzeria").await;
    let product = common::seed_product(&state, shop_id, "Margherita", 500.0).await;
    common::seed_variant(&state, product.id, "Large", 50.0).await;
    let customer = common::seed_customer(&state, "asha").await;

    let placed = placement::place_order(
        &state,
        &customer,
        common::order_request(vec![common::line(product.id, 2, Some("Large"))]),
    )
    .await
    .unwrap();
    assert_eq!(placed.total, 1298.0);

    let order = order_repo::find_by_id(&state.pool, placed.order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.subtotal, 1100.0);
    assert_eq!(order.tax, 198.0);
    assert_eq!(order.shipping, 0.0);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.customer_id, customer.id);
    assert_eq!(order.ship_city, "Bengaluru");

    let items = order_repo::find_items_by_order(&state.pool, order.id)
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].unit_price, 550.0);
    assert_eq!(items[0].subtotal, 1100.0);
    assert_eq!(items[0].size_label.as_deref(), Some("Large"));
    assert_eq!(items[0].status, OrderStatus::Pending);

    // lifetime order counter moves by quantity
    let refreshed = product_repo::find_by_id(&state.pool, product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(refreshed.total_orders, 2);
}

#[tokio::test]
async fn unavailable_lines_are_dropped_silently() {
    let state = common::test_state().await;
    let (shop_id, _) = common::seed_shop(&state, "deli").await;
    let good = common::seed_product(&state, shop_id, "Sandwich", 120.0).await;
    let inactive = product_repo::create(&state.pool, shop_id, "Retired", 80.0, false)
        .await
        .unwrap();
    let customer = common::seed_customer(&state, "vikram").await;

    let placed = placement::place_order(
        &state,
        &customer,
        common::order_request(vec![
            common::line(good.id, 1, None),
            common::line(inactive.id, 3, None),
        ]),
    )
    .await
    .unwrap();

    let items = order_repo::find_items_by_order(&state.pool, placed.order_id)
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].product_id, good.id);

    let order = order_repo::find_by_id(&state.pool, placed.order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.subtotal, 120.0);
}

#[tokio::test]
async fn cart_with_no_valid_lines_is_rejected() {
    let state = common::test_state().await;
    let (shop_id, _) = common::seed_shop(&state, "closed-soon").await;
    let inactive = product_repo::create(&state.pool, shop_id, "Gone", 99.0, false)
        .await
        .unwrap();
    let customer = common::seed_customer(&state, "meera").await;

    let err = placement::place_order(
        &state,
        &customer,
        common::order_request(vec![
            common::line(inactive.id, 1, None),
            common::line(987654321, 1, None),
        ]),
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::EmptyCart);
}

#[tokio::test]
async fn closed_shop_products_are_not_purchasable() {
    let state = common::test_state().await;
    let (shop_id, _) = common::seed_shop(&state, "shut").await;
    let product = common::seed_product(&state, shop_id, "Thing", 50.0).await;
    marketplace_server::db::repository::shop::set_open(&state.pool, shop_id, false)
        .await
        .unwrap();
    let customer = common::seed_customer(&state, "zara").await;

    let err = placement::place_order(
        &state,
        &customer,
        common::order_request(vec![common::line(product.id, 1, None)]),
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::EmptyCart);
}

#[tokio::test]
async fn missing_shipping_fields_fail_validation() {
    let state = common::test_state().await;
    let (shop_id, _) = common::seed_shop(&state, "ok-shop").await;
    let product = common::seed_product(&state, shop_id, "Thing", 50.0).await;
    let customer = common::seed_customer(&state, "dev").await;

    let mut request = common::order_request(vec![common::line(product.id, 1, None)]);
    request.shipping.phone = "   ".into();

    let err = placement::place_order(&state, &customer, request)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
}

#[tokio::test]
async fn unknown_size_drops_the_line() {
    let state = common::test_state().await;
    let (shop_id, _) = common::seed_shop(&state, "sizes").await;
    let product = common::seed_product(&state, shop_id, "Tee", 300.0).await;
    common::seed_variant(&state, product.id, "M", 0.0).await;
    let customer = common::seed_customer(&state, "kiran").await;

    let err = placement::place_order(
        &state,
        &customer,
        common::order_request(vec![common::line(product.id, 1, Some("XXL"))]),
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::EmptyCart);
}

#[tokio::test]
async fn generated_order_numbers_stay_unique() {
    let state = common::test_state().await;
    let (shop_id, _) = common::seed_shop(&state, "busy").await;
    let product = common::seed_product(&state, shop_id, "Snack", 10.0).await;
    let customer = common::seed_customer(&state, "heavy-user").await;

    let mut seen = std::collections::HashSet::new();
    for _ in 0..1000 {
        let placed = placement::place_order(
            &state,
            &customer,
            common::order_request(vec![common::line(product.id, 1, None)]),
        )
        .await
        .unwrap();
        assert!(seen.insert(placed.order_number));
    }
}

#[tokio::test]
async fn number_generation_avoids_stored_collisions() {
    let state = common::test_state().await;
    let n = number::generate(&state.pool, "ORD").await.unwrap();
    assert!(n.starts_with("ORD"));
    assert_eq!(n.len(), 15);
}
