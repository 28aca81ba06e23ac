//! Resolution cache trait and implementations.
//!
//! Maps bare domains (prefix already stripped) to resolved targets.
//! Only successful resolutions are stored; failures are never cached.

use std::future::Future;
use std::time::Duration;

use moka::future::Cache;

/// Trait for caching resolved targets.
///
/// Expired entries must read as absent from `get` even before any
/// background maintenance has removed them, and neither `get` nor
/// `insert` may block on that maintenance.
pub trait ResolutionCache: Send + Sync + Clone + 'static {
    /// Get the cached target for a bare domain.
    fn get(&self, domain: &str) -> impl Future<Output = Option<String>> + Send;

    /// Insert or overwrite a target, restarting its expiration clock.
    fn insert(&self, domain: String, target: String) -> impl Future<Output = ()> + Send;

    /// Returns the number of entries in the cache.
    fn entry_count(&self) -> u64;
}

/// Production cache implementation using Moka.
///
/// Moka provides a high-performance, concurrent cache with time-based
/// expiration and non-blocking maintenance; entries past their TTL are
/// treated as absent on read before they are swept.
#[derive(Clone)]
pub struct MokaCache {
    inner: Cache<String, String>,
}

impl MokaCache {
    /// Create a new cache. `ttl` of `None` means entries never expire.
    #[must_use]
    pub fn new(ttl: Option<Duration>) -> Self {
        let mut builder = Cache::builder();
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            inner: builder.build(),
        }
    }

    /// Create a new cache with a maximum capacity.
    #[must_use]
    pub fn with_capacity(ttl: Option<Duration>, max_capacity: u64) -> Self {
        let mut builder = Cache::builder().max_capacity(max_capacity);
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            inner: builder.build(),
        }
    }
}

impl ResolutionCache for MokaCache {
    async fn get(&self, domain: &str) -> Option<String> {
        self.inner.get(domain).await
    }

    async fn insert(&self, domain: String, target: String) {
        self.inner.insert(domain, target).await;
    }

    fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}
