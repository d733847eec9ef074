//! Settlement generation and mark-paid flows

mod common;

use chrono::Utc;
use marketplace_server::db::repository::order as order_repo;
use marketplace_server::db::repository::shop_payment as payment_repo;
use marketplace_server::orders::{placement, transition};
use marketplace_server::payouts::{self, Period};
use marketplace_server::{CurrentUser, ErrorCode, ServerState};
use shared::models::{
    AdminOrderStatusUpdate, ItemStatusUpdate, MarkPaidRequest, OrderStatus, PayoutStatus,
    PeriodType,
};

fn step(status: OrderStatus) -> ItemStatusUpdate {
    ItemStatusUpdate {
        status,
        note: None,
    }
}

/// Walk a line item forward one step at a time until it reaches `target`
async fn advance_item(
    state: &ServerState,
    actor: &CurrentUser,
    item_id: i64,
    target: OrderStatus,
) {
    loop {
        let item = order_repo::find_item_by_id(&state.pool, item_id)
            .await
            .unwrap()
            .unwrap();
        if item.status == target {
            return;
        }
        let next = item.status.next().expect("target must be reachable");
        transition::update_item_status(state, actor, item_id, step(next))
            .await
            .unwrap();
    }
}

/// Place and deliver one order per shop; returns the shop ids.
async fn seed_delivered_sales(state: &ServerState) -> Vec<i64> {
    let (shop_a, _) = common::seed_shop(state, "north").await;
    let (shop_b, _) = common::seed_shop(state, "south").await;
    let product_a = common::seed_product(state, shop_a, "Biryani", 250.0).await;
    let product_b = common::seed_product(state, shop_b, "Kebab", 180.0).await;
    let customer = common::seed_customer(state, "regular").await;
    let admin = common::seed_admin(state).await;

    for (product, qty) in [(product_a.id, 2), (product_b.id, 1)] {
        let placed = placement::place_order(
            state,
            &customer,
            common::order_request(vec![common::line(product, qty, None)]),
        )
        .await
        .unwrap();
        transition::admin_update_order_status(
            state,
            &admin,
            placed.order_id,
            AdminOrderStatusUpdate {
                status: OrderStatus::Delivered,
                tracking_number: None,
                note: None,
            },
        )
        .await
        .unwrap();
    }

    vec![shop_a, shop_b]
}

#[tokio::test]
async fn generation_settles_each_shop_with_delivered_sales() {
    let state = common::test_state().await;
    let shops = seed_delivered_sales(&state).await;

    let result = payouts::generate_payments(&state.pool, PeriodType::Daily)
        .await
        .unwrap();
    assert_eq!(result.shops_settled, 2);
    assert_eq!(result.period_start, result.period_end);

    let payments = payment_repo::find_all(&state.pool).await.unwrap();
    assert_eq!(payments.len(), 2);

    let north = payments.iter().find(|p| p.shop_id == shops[0]).unwrap();
    // 2 x 250 = 500 delivered, 10% commission
    assert_eq!(north.total_sales, 500.0);
    assert_eq!(north.commission_rate, 10.0);
    assert_eq!(north.commission_amount, 50.0);
    assert_eq!(north.payable_amount, 450.0);
    assert_eq!(north.status, PayoutStatus::Unpaid);

    let south = payments.iter().find(|p| p.shop_id == shops[1]).unwrap();
    assert_eq!(south.total_sales, 180.0);
    assert_eq!(south.payable_amount, 162.0);
}

#[tokio::test]
async fn regenerating_a_period_is_rejected_and_changes_nothing() {
    let state = common::test_state().await;
    seed_delivered_sales(&state).await;

    payouts::generate_payments(&state.pool, PeriodType::Daily)
        .await
        .unwrap();
    let before = payment_repo::find_all(&state.pool).await.unwrap();

    let err = payouts::generate_payments(&state.pool, PeriodType::Daily)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PeriodAlreadyGenerated);

    let after = payment_repo::find_all(&state.pool).await.unwrap();
    assert_eq!(before.len(), after.len());
}

#[tokio::test]
async fn daily_and_weekly_periods_settle_independently() {
    let state = common::test_state().await;
    seed_delivered_sales(&state).await;

    let daily = payouts::generate_payments(&state.pool, PeriodType::Daily)
        .await
        .unwrap();
    let weekly = payouts::generate_payments(&state.pool, PeriodType::Weekly)
        .await
        .unwrap();
    assert_eq!(daily.shops_settled, 2);
    assert_eq!(weekly.shops_settled, 2);
    assert_ne!(
        (daily.period_start.clone(), daily.period_end.clone()),
        (weekly.period_start.clone(), weekly.period_end.clone())
    );

    let payments = payment_repo::find_all(&state.pool).await.unwrap();
    assert_eq!(payments.len(), 4);
}

#[tokio::test]
async fn undelivered_orders_do_not_settle() {
    let state = common::test_state().await;
    let (shop_id, actor) = common::seed_shop(&state, "slow").await;
    let product = common::seed_product(&state, shop_id, "Thali", 150.0).await;
    let customer = common::seed_customer(&state, "waiting").await;

    let placed = placement::place_order(
        &state,
        &customer,
        common::order_request(vec![common::line(product.id, 1, None)]),
    )
    .await
    .unwrap();
    // confirmed but not delivered
    let items = marketplace_server::db::repository::order::find_items_by_order(
        &state.pool,
        placed.order_id,
    )
    .await
    .unwrap();
    transition::update_item_status(
        &state,
        &actor,
        items[0].id,
        shared::models::ItemStatusUpdate {
            status: OrderStatus::Confirmed,
            note: None,
        },
    )
    .await
    .unwrap();

    let result = payouts::generate_payments(&state.pool, PeriodType::Daily)
        .await
        .unwrap();
    assert_eq!(result.shops_settled, 0);
    assert!(payment_repo::find_all(&state.pool).await.unwrap().is_empty());
}

/// One order with one item per shop; returns (item ids, shop ids, actors)
/// in the same order.
async fn mixed_order(state: &ServerState) -> (Vec<i64>, Vec<i64>, Vec<CurrentUser>) {
    let (shop_a, actor_a) = common::seed_shop(state, "east").await;
    let (shop_b, actor_b) = common::seed_shop(state, "west").await;
    let product_a = common::seed_product(state, shop_a, "Paneer Roll", 150.0).await;
    let product_b = common::seed_product(state, shop_b, "Lassi", 60.0).await;
    let customer = common::seed_customer(state, "mixed-buyer").await;

    let placed = placement::place_order(
        state,
        &customer,
        common::order_request(vec![
            common::line(product_a.id, 1, None),
            common::line(product_b.id, 1, None),
        ]),
    )
    .await
    .unwrap();

    let items = order_repo::find_items_by_order(&state.pool, placed.order_id)
        .await
        .unwrap();
    let item_a = items.iter().find(|i| i.shop_id == shop_a).unwrap().id;
    let item_b = items.iter().find(|i| i.shop_id == shop_b).unwrap().id;
    (
        vec![item_a, item_b],
        vec![shop_a, shop_b],
        vec![actor_a, actor_b],
    )
}

#[tokio::test]
async fn cancelled_items_never_settle_even_inside_delivered_orders() {
    let state = common::test_state().await;
    let (items, shops, actors) = mixed_order(&state).await;

    advance_item(&state, &actors[0], items[0], OrderStatus::Delivered).await;
    transition::update_item_status(&state, &actors[1], items[1], step(OrderStatus::Confirmed))
        .await
        .unwrap();
    transition::update_item_status(&state, &actors[1], items[1], step(OrderStatus::Cancelled))
        .await
        .unwrap();

    // the cancelled item is excluded from aggregation, so the order reads
    // delivered; its shop still must not be paid for it
    let order_id = order_repo::find_item_by_id(&state.pool, items[0])
        .await
        .unwrap()
        .unwrap()
        .order_id;
    let order = order_repo::find_by_id(&state.pool, order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.status, OrderStatus::Delivered);

    let result = payouts::generate_payments(&state.pool, PeriodType::Daily)
        .await
        .unwrap();
    assert_eq!(result.shops_settled, 1);

    let payments = payment_repo::find_all(&state.pool).await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].shop_id, shops[0]);
    assert_eq!(payments[0].total_sales, 150.0);
    assert!(!payments.iter().any(|p| p.shop_id == shops[1]));
}

#[tokio::test]
async fn delivered_items_settle_even_when_siblings_lag() {
    let state = common::test_state().await;
    let (items, shops, actors) = mixed_order(&state).await;

    advance_item(&state, &actors[0], items[0], OrderStatus::Delivered).await;
    transition::update_item_status(&state, &actors[1], items[1], step(OrderStatus::Confirmed))
        .await
        .unwrap();

    // the lagging sibling holds the order aggregate back
    let order_id = order_repo::find_item_by_id(&state.pool, items[0])
        .await
        .unwrap()
        .unwrap()
        .order_id;
    let order = order_repo::find_by_id(&state.pool, order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.status, OrderStatus::Confirmed);

    let result = payouts::generate_payments(&state.pool, PeriodType::Daily)
        .await
        .unwrap();
    assert_eq!(result.shops_settled, 1);

    let payments = payment_repo::find_all(&state.pool).await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].shop_id, shops[0]);
    assert_eq!(payments[0].total_sales, 150.0);
    assert_eq!(payments[0].payable_amount, 135.0);
}

#[tokio::test]
async fn mark_paid_stamps_the_payable_amount_once() {
    let state = common::test_state().await;
    seed_delivered_sales(&state).await;
    payouts::generate_payments(&state.pool, PeriodType::Daily)
        .await
        .unwrap();
    let payment = payment_repo::find_all(&state.pool).await.unwrap()[0].clone();

    let paid = payouts::mark_paid(
        &state.pool,
        payment.id,
        &MarkPaidRequest {
            payment_method: Some("bank_transfer".into()),
            transaction_reference: Some("TXN-1001".into()),
            notes: Some("weekly run".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(paid.status, PayoutStatus::Paid);
    assert_eq!(paid.paid_amount, Some(payment.payable_amount));
    assert_eq!(paid.payment_method.as_deref(), Some("bank_transfer"));
    assert_eq!(paid.transaction_reference.as_deref(), Some("TXN-1001"));
    assert!(paid.paid_at.is_some());

    let err = payouts::mark_paid(
        &state.pool,
        payment.id,
        &MarkPaidRequest {
            payment_method: None,
            transaction_reference: None,
            notes: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::PaymentAlreadyPaid);
}

#[tokio::test]
async fn mark_paid_of_missing_record_is_not_found() {
    let state = common::test_state().await;
    let err = payouts::mark_paid(
        &state.pool,
        9999,
        &MarkPaidRequest {
            payment_method: None,
            transaction_reference: None,
            notes: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::PaymentNotFound);
}

#[tokio::test]
async fn explicit_period_generation_matches_current_date() {
    let state = common::test_state().await;
    seed_delivered_sales(&state).await;

    let period = Period::containing(PeriodType::Weekly, Utc::now().date_naive());
    let result = payouts::generate_for_period(&state.pool, period)
        .await
        .unwrap();
    assert_eq!(result.shops_settled, 2);
    assert_eq!(result.period_start, period.start_str());
}
