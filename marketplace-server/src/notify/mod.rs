//! Outbound notifications
//!
//! Fire-and-forget webhook delivery for order events. Notifications are a
//! courtesy: every failure is logged at warn and swallowed so the order
//! workflow never depends on an external endpoint being up.

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::json;
use shared::models::{Order, OrderItem, OrderStatus};
use tracing::{debug, warn};

const NOTIFY_TIMEOUT: Duration = Duration::from_secs(5);

/// Best-effort webhook notifier. Disabled when no URL is configured.
#[derive(Clone)]
pub struct NotificationService {
    webhook_url: Option<String>,
    client: Option<reqwest::Client>,
}

impl NotificationService {
    pub fn new(webhook_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(NOTIFY_TIMEOUT)
            .build()
            .ok();
        if webhook_url.is_some() && client.is_none() {
            warn!("HTTP client init failed; notifications disabled");
        }
        Self {
            webhook_url,
            client,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.webhook_url.is_some() && self.client.is_some()
    }

    async fn post(&self, payload: serde_json::Value) {
        let (Some(url), Some(client)) = (&self.webhook_url, &self.client) else {
            return;
        };
        match client.post(url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(event = %payload["event"], "Notification delivered");
            }
            Ok(response) => {
                warn!(event = %payload["event"], status = %response.status(), "Notification rejected");
            }
            Err(e) => {
                warn!(event = %payload["event"], error = %e, "Notification failed");
            }
        }
    }

    /// Announce a new order: one event per shop involved, one for the
    /// customer, one for the back office.
    pub async fn order_placed(&self, order: &Order, items: &[OrderItem]) {
        if !self.is_enabled() {
            return;
        }

        let mut by_shop: BTreeMap<i64, Vec<&OrderItem>> = BTreeMap::new();
        for item in items {
            by_shop.entry(item.shop_id).or_default().push(item);
        }

        for (shop_id, shop_items) in &by_shop {
            let lines: Vec<_> = shop_items
                .iter()
                .map(|i| {
                    json!({
                        "product_name": i.product_name,
                        "size": i.size_label,
                        "quantity": i.quantity,
                        "subtotal": i.subtotal,
                    })
                })
                .collect();
            self.post(json!({
                "event": "shop.new_order",
                "shop_id": shop_id,
                "order_number": order.order_number,
                "items": lines,
            }))
            .await;
        }

        self.post(json!({
            "event": "customer.order_placed",
            "customer_id": order.customer_id,
            "order_number": order.order_number,
            "total": order.total,
            "email": order.ship_email,
        }))
        .await;

        self.post(json!({
            "event": "admin.order_placed",
            "order_number": order.order_number,
            "shops": by_shop.keys().collect::<Vec<_>>(),
            "total": order.total,
        }))
        .await;
    }

    /// Announce an order-level status change to the customer
    pub async fn order_status_changed(&self, order: &Order, status: OrderStatus) {
        self.post(json!({
            "event": "customer.order_status",
            "customer_id": order.customer_id,
            "order_number": order.order_number,
            "status": status,
        }))
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_without_webhook_url() {
        let service = NotificationService::new(None);
        assert!(!service.is_enabled());
    }

    #[test]
    fn enabled_with_webhook_url() {
        let service = NotificationService::new(Some("http://127.0.0.1:9/hook".into()));
        assert!(service.is_enabled());
    }
}
