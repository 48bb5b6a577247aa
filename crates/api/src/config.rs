use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// SQLite database URL (default: `sqlite://db/catalog.db?mode=rwc`).
    pub database_url: String,
    /// Pool size (default: `5`).
    pub database_max_connections: u32,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long the category and tag lists stay cached (default: one day).
    pub lookup_cache_ttl_secs: u64,
    /// Load the demo catalog into an empty database at startup.
    pub seed_demo_data: bool,
    /// Bootstrap admin account, created at startup when both are set.
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

/// Default lookup cache lifetime: one day.
pub const DEFAULT_LOOKUP_CACHE_TTL_SECS: u64 = 86_400;

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                           |
    /// |----------------------------|-----------------------------------|
    /// | `HOST`                     | `0.0.0.0`                         |
    /// | `PORT`                     | `8000`                            |
    /// | `DATABASE_URL`             | `sqlite://db/catalog.db?mode=rwc` |
    /// | `DATABASE_MAX_CONNECTIONS` | `5`                               |
    /// | `CORS_ORIGINS`             | `http://localhost:8000`           |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                              |
    /// | `LOOKUP_CACHE_TTL_SECS`    | `86400`                           |
    /// | `SEED_DEMO_DATA`           | `false`                           |
    /// | `ADMIN_USERNAME`           | unset                             |
    /// | `ADMIN_PASSWORD`           | unset                             |
    ///
    /// # Panics
    ///
    /// Panics on unparsable numeric values and when `JWT_SECRET` is missing.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://db/catalog.db?mode=rwc".into());

        let database_max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("DATABASE_MAX_CONNECTIONS must be a valid u32");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let lookup_cache_ttl_secs: u64 = std::env::var("LOOKUP_CACHE_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_LOOKUP_CACHE_TTL_SECS.to_string())
            .parse()
            .expect("LOOKUP_CACHE_TTL_SECS must be a valid u64");

        let seed_demo_data = std::env::var("SEED_DEMO_DATA")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let admin_username = non_empty_var("ADMIN_USERNAME");
        let admin_password = non_empty_var("ADMIN_PASSWORD");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            database_url,
            database_max_connections,
            cors_origins,
            request_timeout_secs,
            lookup_cache_ttl_secs,
            seed_demo_data,
            admin_username,
            admin_password,
            jwt,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
