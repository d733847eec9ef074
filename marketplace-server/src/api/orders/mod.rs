//! Customer order routes

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{Role, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::place_order).get(handler::list_own))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_role(Role::Customer)))
}
