//! In-process cache for the category and tag lists.
//!
//! Every search page render needs the full category and tag lists to build
//! the filter form. Both change rarely, so they are kept in memory for
//! [`ServerConfig::lookup_cache_ttl_secs`](crate::config::ServerConfig) and
//! dropped whenever the admin API writes a category or tag.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use catalog_db::models::category::Category;
use catalog_db::models::tag::Tag;
use catalog_db::repositories::{CategoryRepo, TagRepo};
use catalog_db::DbPool;
use tokio::sync::RwLock;

/// A value together with the instant it was loaded.
struct Entry<T> {
    loaded_at: Instant,
    value: Arc<T>,
}

/// One lazily loaded, expiring cache slot.
pub struct CachedSlot<T> {
    entry: RwLock<Option<Entry<T>>>,
}

impl<T> Default for CachedSlot<T> {
    fn default() -> Self {
        Self {
            entry: RwLock::new(None),
        }
    }
}

impl<T> CachedSlot<T> {
    /// Return the cached value if it is younger than `ttl`, otherwise run
    /// `load` and cache its result. Load errors are returned and not cached.
    pub async fn get_or_try_load<E, F, Fut>(&self, ttl: Duration, load: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        {
            let guard = self.entry.read().await;
            if let Some(entry) = guard.as_ref() {
                if entry.loaded_at.elapsed() < ttl {
                    return Ok(Arc::clone(&entry.value));
                }
            }
        }

        let mut guard = self.entry.write().await;
        // Another task may have refreshed the slot while we waited.
        if let Some(entry) = guard.as_ref() {
            if entry.loaded_at.elapsed() < ttl {
                return Ok(Arc::clone(&entry.value));
            }
        }

        let value = Arc::new(load().await?);
        *guard = Some(Entry {
            loaded_at: Instant::now(),
            value: Arc::clone(&value),
        });
        Ok(value)
    }

    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
    }

    pub async fn is_loaded(&self) -> bool {
        self.entry.read().await.is_some()
    }
}

/// Cached category and tag lists.
pub struct LookupCache {
    ttl: Duration,
    categories: CachedSlot<Vec<Category>>,
    tags: CachedSlot<Vec<Tag>>,
}

impl LookupCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            categories: CachedSlot::default(),
            tags: CachedSlot::default(),
        }
    }

    /// All categories ordered by name.
    pub async fn categories(&self, pool: &DbPool) -> Result<Arc<Vec<Category>>, sqlx::Error> {
        self.categories
            .get_or_try_load(self.ttl, move || async move {
                let categories = CategoryRepo::list_all(pool).await?;
                tracing::debug!(count = categories.len(), "Category lookup cache refreshed");
                Ok::<_, sqlx::Error>(categories)
            })
            .await
    }

    /// All tags ordered by name.
    pub async fn tags(&self, pool: &DbPool) -> Result<Arc<Vec<Tag>>, sqlx::Error> {
        self.tags
            .get_or_try_load(self.ttl, move || async move {
                let tags = TagRepo::list_all(pool).await?;
                tracing::debug!(count = tags.len(), "Tag lookup cache refreshed");
                Ok::<_, sqlx::Error>(tags)
            })
            .await
    }

    pub async fn invalidate_categories(&self) {
        self.categories.invalidate().await;
    }

    pub async fn invalidate_tags(&self) {
        self.tags.invalidate().await;
    }

    pub async fn categories_cached(&self) -> bool {
        self.categories.is_loaded().await
    }

    pub async fn tags_cached(&self) -> bool {
        self.tags.is_loaded().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    async fn load_counting(
        slot: &CachedSlot<Vec<u32>>,
        ttl: Duration,
        calls: &AtomicUsize,
    ) -> Arc<Vec<u32>> {
        slot.get_or_try_load(ttl, move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) as u32;
            Ok::<_, ()>(vec![n])
        })
        .await
        .expect("loader never fails")
    }

    #[tokio::test]
    async fn fresh_entry_is_reused() {
        let slot = CachedSlot::default();
        let calls = AtomicUsize::new(0);
        let ttl = Duration::from_secs(60);

        assert_eq!(*load_counting(&slot, ttl, &calls).await, vec![0]);
        assert_eq!(*load_counting(&slot, ttl, &calls).await, vec![0]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_entry_is_reloaded() {
        let slot = CachedSlot::default();
        let calls = AtomicUsize::new(0);

        load_counting(&slot, Duration::ZERO, &calls).await;
        assert_eq!(*load_counting(&slot, Duration::ZERO, &calls).await, vec![1]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_reload() {
        let slot = CachedSlot::default();
        let calls = AtomicUsize::new(0);
        let ttl = Duration::from_secs(60);

        load_counting(&slot, ttl, &calls).await;
        assert!(slot.is_loaded().await);
        slot.invalidate().await;
        assert!(!slot.is_loaded().await);
        assert_eq!(*load_counting(&slot, ttl, &calls).await, vec![1]);
    }

    #[tokio::test]
    async fn load_errors_are_not_cached() {
        let slot: CachedSlot<Vec<u32>> = CachedSlot::default();
        let ttl = Duration::from_secs(60);

        let failed = slot
            .get_or_try_load(ttl, || async { Err::<Vec<u32>, _>("db down") })
            .await;
        assert_eq!(failed.err(), Some("db down"));
        assert!(!slot.is_loaded().await);

        let loaded = slot
            .get_or_try_load(ttl, || async { Ok::<_, &str>(vec![5]) })
            .await;
        assert_eq!(loaded.ok().map(|v| v[0]), Some(5));
    }
}
