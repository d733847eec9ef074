//! API route modules
//!
//! - [`health`] - liveness check
//! - [`auth`] - login
//! - [`orders`] - customer order placement and history
//! - [`fulfillment`] - shop line-item fulfillment
//! - [`admin`] - order overrides and settlement management
//!
//! Every module exposes `router()` returning `Router<ServerState>`; the
//! authentication layer is applied once over the merged router in
//! `core::server`.

pub mod admin;
pub mod auth;
pub mod fulfillment;
pub mod health;
pub mod orders;

use axum::Router;

use crate::core::ServerState;

/// Assemble all API routes
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(orders::router())
        .merge(fulfillment::router())
        .merge(admin::router())
}
