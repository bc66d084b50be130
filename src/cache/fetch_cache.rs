//! Time-boxed memoization of collection GET responses.
//!
//! A [`FetchCache`] maps an endpoint key (e.g. `"Course"`) to the JSON payload
//! last fetched for it and the instant the fetch was issued. Reads within the
//! freshness window are answered from memory; anything else goes to the
//! [`ResourceSource`].
//!
//! There is no request coalescing: two concurrent misses for the same key
//! both reach the source and the last response written wins. A response whose
//! request was issued before an invalidation is returned to its caller but
//! never stored.

use crate::config::DEFAULT_CACHE_TTL_MS;
use crate::domain::EndpointKey;
use crate::error::{ApiError, ApiResult};
use crate::metrics::Metrics;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Where cache misses are served from.
///
/// Implemented by the API client; tests substitute counting fakes.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// GET the collection named by `key` and return the raw JSON body.
    async fn fetch_resource(&self, key: &EndpointKey) -> ApiResult<Value>;
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: Arc<Value>,
    fetched_at: Instant,
}

/// Per-endpoint response cache with a fixed freshness window.
///
/// The cache is an owned value rather than a global: construct one per client
/// (or per test) and hand clones to whoever needs it. Clones share the same
/// entries.
#[derive(Clone)]
pub struct FetchCache {
    entries: Arc<RwLock<HashMap<EndpointKey, CacheEntry>>>,
    /// Bumped by every invalidation
    generation: Arc<AtomicU64>,
    ttl: Duration,
    source: Arc<dyn ResourceSource>,
    metrics: Metrics,
}

impl FetchCache {
    /// Create a cache in front of `source` with the given freshness window.
    pub fn new(source: Arc<dyn ResourceSource>, ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            generation: Arc::new(AtomicU64::new(0)),
            ttl,
            source,
            metrics: Metrics::new(),
        }
    }

    /// Create a cache with the default 30 second window.
    pub fn with_default_ttl(source: Arc<dyn ResourceSource>) -> Self {
        Self::new(source, Duration::from_millis(DEFAULT_CACHE_TTL_MS))
    }

    /// Report hits and misses into an existing collector.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Return the payload for `endpoint_key`, fetching it when needed.
    ///
    /// A cached entry younger than the window is returned without touching the
    /// source unless `force_refresh` is set. On a miss the response is stored
    /// stamped with the instant the request was issued, unless the cache was
    /// invalidated while the request was in flight. Source errors are returned
    /// unchanged and leave the cache as it was.
    ///
    /// # Errors
    ///
    /// `ApiError::Validation` for a blank key (no request is made), otherwise
    /// whatever the source returned.
    pub async fn fetch_with_cache(
        &self,
        endpoint_key: &str,
        force_refresh: bool,
    ) -> ApiResult<Arc<Value>> {
        let key = EndpointKey::new(endpoint_key)?;
        let now = Instant::now();

        if !force_refresh {
            if let Some(data) = self.fresh_entry(&key, now) {
                debug!(endpoint = %key, "fetch cache hit");
                self.metrics.record_cache_hit();
                return Ok(data);
            }
        }

        debug!(endpoint = %key, force_refresh, "fetch cache miss");
        self.metrics.record_cache_miss();
        let generation = self.generation.load(Ordering::SeqCst);

        let data = match self.source.fetch_resource(&key).await {
            Ok(value) => Arc::new(value),
            Err(e) => {
                warn!(endpoint = %key, error = %e, "fetch failed, cache left untouched");
                return Err(e);
            }
        };

        if let Ok(mut entries) = self.entries.write() {
            // checked under the write lock so an invalidation cannot slip in between
            if self.generation.load(Ordering::SeqCst) != generation {
                debug!(endpoint = %key, "cache invalidated during fetch, response not stored");
                return Ok(data);
            }
            entries.insert(
                key,
                CacheEntry {
                    data: data.clone(),
                    fetched_at: now,
                },
            );
        }

        Ok(data)
    }

    /// Like [`fetch_with_cache`](Self::fetch_with_cache) but deserializes the
    /// payload into `T`.
    ///
    /// A payload that does not match `T` is reported as a malformed response;
    /// the entry itself stays cached.
    pub async fn fetch_as<T>(&self, endpoint_key: &str, force_refresh: bool) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let data = self.fetch_with_cache(endpoint_key, force_refresh).await?;
        T::deserialize(data.as_ref()).map_err(|e| {
            ApiError::MalformedResponse(format!("unexpected shape for {}: {}", endpoint_key, e))
        })
    }

    /// Remove the entry for `endpoint_key`, or every entry when `None`.
    ///
    /// Missing keys are ignored. Fetches already in flight will not store
    /// their responses, whichever key they are for.
    pub fn invalidate(&self, endpoint_key: Option<&str>) {
        if let Ok(mut entries) = self.entries.write() {
            self.generation.fetch_add(1, Ordering::SeqCst);
            match endpoint_key {
                Some(key) => {
                    debug!(endpoint = key, "invalidating fetch cache entry");
                    if let Ok(key) = EndpointKey::new(key) {
                        entries.remove(&key);
                    }
                }
                None => {
                    debug!("clearing fetch cache");
                    entries.clear();
                }
            }
        }
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.invalidate(None);
    }

    /// Whether `endpoint_key` has an entry that would be served without a request.
    pub fn is_fresh(&self, endpoint_key: &str) -> bool {
        match EndpointKey::new(endpoint_key) {
            Ok(key) => self.fresh_entry(&key, Instant::now()).is_some(),
            Err(_) => false,
        }
    }

    /// Drop entries that have outlived the window.
    ///
    /// Not required for correctness: stale entries are never served.
    pub fn cleanup_expired(&self) {
        let now = Instant::now();

        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|_, entry| now.duration_since(entry.fetched_at) < self.ttl);
        }
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn fresh_entry(&self, key: &EndpointKey, now: Instant) -> Option<Arc<Value>> {
        let entries = self.entries.read().ok()?;
        let entry = entries.get(key)?;
        if now.duration_since(entry.fetched_at) < self.ttl {
            Some(entry.data.clone())
        } else {
            None
        }
    }
}

impl std::fmt::Debug for FetchCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.len())
            .finish()
    }
}
