//! Admin routes: order overrides and settlement management

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{Role, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/orders/{id}/status", post(handler::update_order_status))
        .route("/payments", get(handler::list_payments))
        .route("/payments/generate", post(handler::generate_payments))
        .route("/payments/{id}/mark-paid", post(handler::mark_paid))
        .layer(middleware::from_fn(require_role(Role::Admin)))
}
