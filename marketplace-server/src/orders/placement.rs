//! Order placement workflow
//!
//! Re-prices the submitted cart against the live catalog, silently dropping
//! lines that can no longer be purchased, then writes the order, its items
//! and the product counters in one transaction. Address memo and outbound
//! notifications happen after commit and never fail the placement.

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{order as order_repo, product as product_repo, user as user_repo};
use crate::orders::{number, pricing};
use crate::utils::validation::{self, MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN};
use shared::models::{
    CartLine, Order, OrderItem, OrderPlaced, OrderStatus, PaymentStatus, PlaceOrderRequest,
    ShippingDetails,
};
use shared::{AppError, AppResult, ErrorCode};
use tracing::{info, warn};

/// A cart line validated and priced against the catalog
struct PricedLine {
    shop_id: i64,
    product_id: i64,
    product_name: String,
    size_label: Option<String>,
    unit_price: f64,
    quantity: i64,
    subtotal: f64,
}

fn validate_shipping(ship: &ShippingDetails) -> AppResult<()> {
    validation::validate_required_text(&ship.full_name, "full_name", MAX_NAME_LEN)?;
    validation::validate_required_text(&ship.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validation::validate_required_text(&ship.address, "address", MAX_ADDRESS_LEN)?;
    validation::validate_required_text(&ship.city, "city", MAX_SHORT_TEXT_LEN)?;
    validation::validate_required_text(&ship.state, "state", MAX_SHORT_TEXT_LEN)?;
    validation::validate_required_text(&ship.pincode, "pincode", MAX_SHORT_TEXT_LEN)?;
    validation::validate_optional_text(&ship.email, "email", validation::MAX_EMAIL_LEN)?;
    Ok(())
}

/// Price one cart line, returning `None` when the line must be dropped:
/// product missing/inactive, shop closed, unknown size, bad quantity.
async fn price_line(state: &ServerState, line: &CartLine) -> AppResult<Option<PricedLine>> {
    if line.quantity <= 0 {
        warn!(product_id = line.id, quantity = line.quantity, "Dropping cart line: invalid quantity");
        return Ok(None);
    }

    let Some(product) = product_repo::find_purchasable(&state.pool, line.id).await? else {
        warn!(product_id = line.id, "Dropping cart line: product unavailable");
        return Ok(None);
    };

    let adjustment = match &line.size {
        Some(label) => {
            let Some(variant) =
                product_repo::find_variant(&state.pool, product.id, label).await?
            else {
                warn!(product_id = product.id, size = %label, "Dropping cart line: unknown size");
                return Ok(None);
            };
            variant.price_adjustment
        }
        None => 0.0,
    };

    let unit = pricing::unit_price(product.price, adjustment);
    Ok(Some(PricedLine {
        shop_id: product.shop_id,
        product_id: product.id,
        product_name: product.name,
        size_label: line.size.clone(),
        unit_price: unit,
        quantity: line.quantity,
        subtotal: pricing::line_subtotal(unit, line.quantity),
    }))
}

/// Place an order for the authenticated customer
pub async fn place_order(
    state: &ServerState,
    customer: &CurrentUser,
    request: PlaceOrderRequest,
) -> AppResult<OrderPlaced> {
    validate_shipping(&request.shipping)?;

    let mut lines = Vec::with_capacity(request.items.len());
    for cart_line in &request.items {
        if let Some(priced) = price_line(state, cart_line).await? {
            lines.push(priced);
        }
    }
    if lines.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyCart));
    }

    let totals = pricing::order_totals(&lines.iter().map(|l| l.subtotal).collect::<Vec<_>>());
    let order_number = number::generate(&state.pool, &state.config.order_number_prefix).await?;

    let now = shared::util::now_millis();
    let order = Order {
        id: shared::util::snowflake_id(),
        order_number,
        customer_id: customer.id,
        subtotal: totals.subtotal,
        tax: totals.tax,
        shipping: totals.shipping,
        total: totals.total,
        status: OrderStatus::Pending,
        payment_method: request.payment_method,
        payment_status: PaymentStatus::Pending,
        ship_name: request.shipping.full_name.clone(),
        ship_phone: request.shipping.phone.clone(),
        ship_address: request.shipping.address.clone(),
        ship_city: request.shipping.city.clone(),
        ship_state: request.shipping.state.clone(),
        ship_pincode: request.shipping.pincode.clone(),
        ship_email: request.shipping.email.clone(),
        tracking_number: None,
        created_at: now,
        updated_at: now,
        confirmed_at: None,
        shipped_at: None,
        delivered_at: None,
        cancelled_at: None,
    };

    let items: Vec<OrderItem> = lines
        .iter()
        .map(|line| OrderItem {
            id: shared::util::snowflake_id(),
            order_id: order.id,
            shop_id: line.shop_id,
            product_id: line.product_id,
            product_name: line.product_name.clone(),
            unit_price: line.unit_price,
            size_label: line.size_label.clone(),
            quantity: line.quantity,
            subtotal: line.subtotal,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        })
        .collect();

    let mut tx = state
        .pool
        .begin()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    order_repo::insert_order(&mut *tx, &order).await?;
    for item in &items {
        order_repo::insert_item(&mut *tx, item).await?;
        product_repo::increment_total_orders(&mut *tx, item.product_id, item.quantity).await?;
    }
    tx.commit()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    info!(
        order_id = order.id,
        order_number = %order.order_number,
        items = items.len(),
        total = order.total,
        "Order placed"
    );

    // Post-commit conveniences: never fail the placement
    if let Err(e) =
        user_repo::update_default_address(&state.pool, customer.id, &request.shipping).await
    {
        warn!(customer_id = customer.id, error = %e, "Failed to save default address");
    }
    state.notifier.order_placed(&order, &items).await;

    Ok(OrderPlaced {
        order_id: order.id,
        order_number: order.order_number,
        total: order.total,
    })
}
