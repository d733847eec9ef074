use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::notify::NotificationService;
use shared::AppResult;

/// Server state — shared handle to every service
///
/// Cheap to clone: the pool and services are reference-counted internally.
/// There is no other cross-request in-memory state; the database is the
/// single shared mutable resource.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration (immutable after startup)
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT authentication service
    pub jwt: Arc<JwtService>,
    /// Best-effort outbound notifications
    pub notifier: NotificationService,
}

impl ServerState {
    /// Initialize all services from configuration
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        std::fs::create_dir_all(&config.work_dir).map_err(|e| {
            shared::AppError::internal(format!(
                "Failed to create work dir {}: {e}",
                config.work_dir
            ))
        })?;

        let db = DbService::new(&config.database_path).await?;
        let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));
        let notifier = NotificationService::new(config.notify_webhook_url.clone());

        Ok(Self {
            config: config.clone(),
            pool: db.pool,
            jwt,
            notifier,
        })
    }

    /// Build state around an existing pool (integration tests)
    pub fn for_tests(config: Config, pool: SqlitePool) -> Self {
        Self {
            jwt: Arc::new(JwtService::with_config(config.jwt.clone())),
            notifier: NotificationService::new(None),
            config,
            pool,
        }
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt.clone()
    }
}
