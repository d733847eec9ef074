//! Status enums for orders, items, payments and settlements
//!
//! One status vocabulary is shared by orders and their line items; the two
//! differ only in who may move them (see the server's state machine).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fulfillment status for an order or a single line item
///
/// Linear flow: `pending → confirmed → processing → shipped → delivered`.
/// `cancelled` branches off the linear flow; `returned` and `refunded` are
/// administrative terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type), sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
    Refunded,
}

impl OrderStatus {
    /// Progress rank within the linear flow; `None` for terminal branches
    pub fn rank(&self) -> Option<u8> {
        match self {
            Self::Pending => Some(0),
            Self::Confirmed => Some(1),
            Self::Processing => Some(2),
            Self::Shipped => Some(3),
            Self::Delivered => Some(4),
            Self::Cancelled | Self::Returned | Self::Refunded => None,
        }
    }

    /// The next status in the linear flow, if any
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            Self::Pending => Some(Self::Confirmed),
            Self::Confirmed => Some(Self::Processing),
            Self::Processing => Some(Self::Shipped),
            Self::Shipped => Some(Self::Delivered),
            _ => None,
        }
    }

    /// Whether this status participates in the linear flow
    pub fn is_active(&self) -> bool {
        self.rank().is_some()
    }

    /// Canonical lowercase name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Returned => "returned",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            "returned" => Ok(Self::Returned),
            "refunded" => Ok(Self::Refunded),
            other => Err(format!("unrecognized status: {other}")),
        }
    }
}

/// Payment method for orders (only cash on delivery is accepted today)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type), sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CashOnDelivery,
}

/// Payment status for orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type), sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

/// Payout status for shop settlements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type), sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PayoutStatus {
    Unpaid,
    Paid,
}

/// Settlement period granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type), sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Daily,
    Weekly,
}

impl PeriodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_flow_is_connected() {
        let mut status = OrderStatus::Pending;
        let mut steps = 0;
        while let Some(next) = status.next() {
            assert_eq!(next.rank(), status.rank().map(|r| r + 1));
            status = next;
            steps += 1;
        }
        assert_eq!(status, OrderStatus::Delivered);
        assert_eq!(steps, 4);
    }

    #[test]
    fn terminal_branches_have_no_rank() {
        assert_eq!(OrderStatus::Cancelled.rank(), None);
        assert_eq!(OrderStatus::Returned.rank(), None);
        assert_eq!(OrderStatus::Refunded.rank(), None);
        assert!(!OrderStatus::Cancelled.is_active());
    }

    #[test]
    fn round_trips_through_strings() {
        for s in [
            "pending",
            "confirmed",
            "processing",
            "shipped",
            "delivered",
            "cancelled",
            "returned",
            "refunded",
        ] {
            let parsed: OrderStatus = s.parse().unwrap();
            assert_eq!(parsed.as_str(), s);
        }
        assert!("sent".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Shipped).unwrap();
        assert_eq!(json, "\"shipped\"");
        let method = serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap();
        assert_eq!(method, "\"cash_on_delivery\"");
    }
}
