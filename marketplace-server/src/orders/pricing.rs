//! Pricing calculator
//!
//! Money is stored as f64 but every arithmetic step runs through
//! `rust_decimal` and is rounded to two decimals, midpoint away from zero.
//! Prices always come from the live catalog, never from the client.

use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

/// 18% flat tax applied to the order subtotal
const TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

pub(crate) fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

pub(crate) fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub(crate) fn to_f64(value: Decimal) -> f64 {
    round2(value).to_f64().unwrap_or_default()
}

/// Effective unit price: base price plus the size variant adjustment
pub fn unit_price(base_price: f64, size_adjustment: f64) -> f64 {
    to_f64(to_decimal(base_price) + to_decimal(size_adjustment))
}

/// Line subtotal: unit price times quantity
pub fn line_subtotal(unit_price: f64, quantity: i64) -> f64 {
    to_f64(to_decimal(unit_price) * Decimal::from(quantity))
}

/// Computed money fields for an order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub shipping: f64,
    pub total: f64,
}

/// Totals over the priced line subtotals. Shipping is free for every order.
pub fn order_totals(line_subtotals: &[f64]) -> OrderTotals {
    let subtotal: Decimal = line_subtotals.iter().map(|v| to_decimal(*v)).sum();
    let subtotal = round2(subtotal);
    let tax = round2(subtotal * TAX_RATE);
    let shipping = Decimal::ZERO;
    let total = round2(subtotal + tax + shipping);
    OrderTotals {
        subtotal: to_f64(subtotal),
        tax: to_f64(tax),
        shipping: to_f64(shipping),
        total: to_f64(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_adjustment_applies_to_unit_price() {
        assert_eq!(unit_price(500.0, 50.0), 550.0);
        assert_eq!(unit_price(500.0, 0.0), 500.0);
        assert_eq!(unit_price(99.99, -10.0), 89.99);
    }

    #[test]
    fn worked_example_two_large_pizzas() {
        // (500 + 50) x 2 = 1100, tax 198, total 1298
        let unit = unit_price(500.0, 50.0);
        let line = line_subtotal(unit, 2);
        assert_eq!(line, 1100.0);

        let totals = order_totals(&[line]);
        assert_eq!(totals.subtotal, 1100.0);
        assert_eq!(totals.tax, 198.0);
        assert_eq!(totals.shipping, 0.0);
        assert_eq!(totals.total, 1298.0);
    }

    #[test]
    fn rounding_is_midpoint_away_from_zero() {
        // 33.33 * 3 = 99.99; 18% of 99.99 = 17.9982 -> 18.00
        let line = line_subtotal(33.33, 3);
        let totals = order_totals(&[line]);
        assert_eq!(totals.tax, 18.0);
        assert_eq!(totals.total, 117.99);

        // Half-cent boundaries round away from zero
        assert_eq!(to_f64(Decimal::new(1005, 3)), 1.01); // 1.005
    }

    #[test]
    fn multi_line_totals_sum_rounded_lines() {
        let lines = [
            line_subtotal(250.0, 1),
            line_subtotal(120.5, 2),
            line_subtotal(75.25, 4),
        ];
        let totals = order_totals(&lines);
        assert_eq!(totals.subtotal, 792.0);
        assert_eq!(totals.tax, 142.56);
        assert_eq!(totals.total, 934.56);
    }

    #[test]
    fn empty_order_is_all_zero() {
        let totals = order_totals(&[]);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.total, 0.0);
    }
}
