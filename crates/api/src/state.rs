use std::sync::Arc;

use crate::cache::LookupCache;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted and everything else is
/// behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: catalog_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Category and tag lists used to render the search form.
    pub lookups: Arc<LookupCache>,
}

impl AppState {
    pub fn new(pool: catalog_db::DbPool, config: ServerConfig) -> Self {
        let lookups = Arc::new(LookupCache::new(std::time::Duration::from_secs(
            config.lookup_cache_ttl_secs,
        )));
        Self {
            pool,
            config: Arc::new(config),
            lookups,
        }
    }
}
