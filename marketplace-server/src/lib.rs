//! Marketplace Order Service
//!
//! Multi-vendor marketplace backend reduced to its order-lifecycle core:
//! cash-on-delivery order placement, per-item fulfillment with order-level
//! status aggregation, and periodic commission settlements per shop.
//!
//! # Module structure
//!
//! ```text
//! marketplace-server/src/
//! ├── core/      # config, state, server
//! ├── auth/      # JWT authentication, role guard
//! ├── db/        # SQLite pool, migrations, repositories
//! ├── orders/    # pricing, placement, state machine, aggregation
//! ├── payouts/   # commission settlement generation
//! ├── notify/    # best-effort outbound notifications
//! ├── api/       # HTTP routes and handlers
//! └── utils/     # logger, validation helpers
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod notify;
pub mod orders;
pub mod payouts;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService, Role};
pub use crate::core::{Config, Server, ServerState};
pub use shared::{ApiResponse, AppError, AppResult, ErrorCode};

pub use utils::logger::init_logger;

/// Load `.env` and initialize logging.
///
/// Called once at the top of `main`; separate from `Config::from_env` so
/// tests can build configs without touching global logger state.
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
