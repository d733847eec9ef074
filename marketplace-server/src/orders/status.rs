//! Item status state machine and order status aggregation
//!
//! Shops move their own line items one step forward along the linear flow
//! (or cancel mid-flight); admins may set any recognized status. After every
//! item change the parent order's status is recomputed from its items.

use shared::models::OrderStatus;
use shared::{AppError, ErrorCode};

/// Validate a shop-actor transition on a line item.
///
/// Allowed moves: exactly one step forward along
/// `pending → confirmed → processing → shipped → delivered`, or `cancelled`
/// from `confirmed`/`processing`.
pub fn validate_shop_transition(from: OrderStatus, to: OrderStatus) -> Result<(), AppError> {
    let allowed = match to {
        OrderStatus::Cancelled => {
            matches!(from, OrderStatus::Confirmed | OrderStatus::Processing)
        }
        _ => from.next() == Some(to),
    };

    if allowed {
        Ok(())
    } else {
        Err(
            AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!("Cannot move item from {from} to {to}"),
            )
            .with_detail("from", from.as_str())
            .with_detail("to", to.as_str()),
        )
    }
}

/// Recompute an order's aggregate status from its item statuses.
///
/// The order sits at the least-advanced of its still-active items. When no
/// active item remains, the most severe terminal state wins: refunded over
/// returned over cancelled. An order with no items has no aggregate.
pub fn aggregate(item_statuses: &[OrderStatus]) -> Option<OrderStatus> {
    if item_statuses.is_empty() {
        return None;
    }

    let least_advanced = item_statuses
        .iter()
        .filter(|s| s.is_active())
        .min_by_key(|s| s.rank());
    if let Some(status) = least_advanced {
        return Some(*status);
    }

    for terminal in [
        OrderStatus::Refunded,
        OrderStatus::Returned,
        OrderStatus::Cancelled,
    ] {
        if item_statuses.contains(&terminal) {
            return Some(terminal);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn shop_moves_one_step_forward() {
        assert!(validate_shop_transition(Pending, Confirmed).is_ok());
        assert!(validate_shop_transition(Confirmed, Processing).is_ok());
        assert!(validate_shop_transition(Processing, Shipped).is_ok());
        assert!(validate_shop_transition(Shipped, Delivered).is_ok());
    }

    #[test]
    fn shop_cannot_skip_or_rewind() {
        assert!(validate_shop_transition(Pending, Shipped).is_err());
        assert!(validate_shop_transition(Shipped, Confirmed).is_err());
        assert!(validate_shop_transition(Delivered, Delivered).is_err());
    }

    #[test]
    fn shop_cancels_only_mid_flight() {
        assert!(validate_shop_transition(Confirmed, Cancelled).is_ok());
        assert!(validate_shop_transition(Processing, Cancelled).is_ok());
        assert!(validate_shop_transition(Pending, Cancelled).is_err());
        assert!(validate_shop_transition(Shipped, Cancelled).is_err());
        assert!(validate_shop_transition(Cancelled, Confirmed).is_err());
    }

    #[test]
    fn shop_cannot_reach_admin_terminals() {
        assert!(validate_shop_transition(Delivered, Returned).is_err());
        assert!(validate_shop_transition(Delivered, Refunded).is_err());
    }

    #[test]
    fn aggregate_tracks_least_advanced_active_item() {
        assert_eq!(aggregate(&[Pending, Shipped]), Some(Pending));
        assert_eq!(aggregate(&[Confirmed, Processing, Delivered]), Some(Confirmed));
        assert_eq!(aggregate(&[Delivered, Delivered]), Some(Delivered));
    }

    #[test]
    fn aggregate_ignores_inactive_items() {
        assert_eq!(aggregate(&[Cancelled, Delivered]), Some(Delivered));
        assert_eq!(aggregate(&[Cancelled, Pending, Shipped]), Some(Pending));
        assert_eq!(aggregate(&[Refunded, Processing]), Some(Processing));
    }

    #[test]
    fn aggregate_terminal_precedence() {
        assert_eq!(aggregate(&[Cancelled, Cancelled]), Some(Cancelled));
        assert_eq!(aggregate(&[Cancelled, Returned]), Some(Returned));
        assert_eq!(aggregate(&[Cancelled, Returned, Refunded]), Some(Refunded));
    }

    #[test]
    fn aggregate_of_nothing_is_nothing() {
        assert_eq!(aggregate(&[]), None);
    }
}
