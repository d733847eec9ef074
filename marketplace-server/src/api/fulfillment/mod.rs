//! Shop fulfillment routes

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{Role, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shop/order-items", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_shop_items))
        .route("/{id}/status", post(handler::update_status))
        .layer(middleware::from_fn(require_role(Role::Shop)))
}
