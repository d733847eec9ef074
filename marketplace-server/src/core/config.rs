use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/marketplace | working directory (database, logs) |
/// | DATABASE_PATH | `<WORK_DIR>/marketplace.db` | SQLite database file |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | NOTIFY_WEBHOOK_URL | (unset) | outbound order-notification webhook |
/// | ORDER_NUMBER_PREFIX | ORD | prefix for generated order numbers |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for database and log files
    pub work_dir: String,
    /// SQLite database file path
    pub database_path: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT authentication configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Optional webhook for order notifications; unset means log-only
    pub notify_webhook_url: Option<String>,
    /// Prefix for generated human-readable order numbers
    pub order_number_prefix: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults where unset
    pub fn from_env() -> Self {
        let work_dir =
            std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/marketplace".into());
        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| format!("{work_dir}/marketplace.db"));
        Self {
            work_dir,
            database_path,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            notify_webhook_url: std::env::var("NOTIFY_WEBHOOK_URL").ok(),
            order_number_prefix: std::env::var("ORDER_NUMBER_PREFIX")
                .unwrap_or_else(|_| "ORD".into()),
        }
    }

    /// Override work dir, database path and port (test scenarios)
    pub fn with_overrides(
        work_dir: impl Into<String>,
        database_path: impl Into<String>,
        http_port: u16,
    ) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.database_path = database_path.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
