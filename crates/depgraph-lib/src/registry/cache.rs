use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::trace;

use super::PackageDescriptor;

/// Default cache TTL (Time To Live) - 10 minutes
const DEFAULT_CACHE_TTL_SECS: u64 = 600;

/// Time source for TTL decisions, injectable so expiry tests are deterministic
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time (production)
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock (testing)
///
/// Clones share the same offset, so a test can keep one handle to advance
/// time while the cache holds the other.
#[derive(Debug, Clone)]
pub struct ManualClock {
    start: Instant,
    offset_millis: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            offset_millis: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, delta: Duration) {
        self.offset_millis
            .fetch_add(delta.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + Duration::from_millis(self.offset_millis.load(Ordering::SeqCst))
    }
}

/// Cached descriptor stamped with its insertion time
#[derive(Debug, Clone)]
struct CachedDescriptor {
    descriptor: PackageDescriptor,
    stored_at: Instant,
}

/// In-memory TTL cache for package descriptors
///
/// The one resource shared across overlapping builds; all access goes through
/// the internal RwLock. Entries are valid while `now - stored_at < ttl` and
/// expired entries are evicted as a side effect of lookup.
pub struct DescriptorCache {
    entries: Arc<RwLock<HashMap<String, CachedDescriptor>>>,
    ttl: Duration,
    clock: Box<dyn Clock>,
}

impl DescriptorCache {
    /// Create a cache with the default TTL and wall-clock time
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }

    /// Create a cache with a custom TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }

    /// Create a cache with a custom TTL and time source
    pub fn with_clock(ttl: Duration, clock: impl Clock + 'static) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            clock: Box::new(clock),
        }
    }

    /// Get a live descriptor for a package name
    ///
    /// Expired entries are removed and reported as misses.
    pub async fn get(&self, name: &str) -> Option<PackageDescriptor> {
        let now = self.clock.now();

        {
            let entries = self.entries.read().await;
            match entries.get(name) {
                Some(entry) if now.duration_since(entry.stored_at) < self.ttl => {
                    trace!(package = name, "cache hit");
                    return Some(entry.descriptor.clone());
                }
                Some(_) => {}
                None => {
                    trace!(package = name, "cache miss");
                    return None;
                }
            }
        }

        // Expired: evict under the write lock, re-checking because another
        // task may have refreshed the entry while we upgraded
        let mut entries = self.entries.write().await;
        match entries.get(name) {
            Some(entry) if now.duration_since(entry.stored_at) < self.ttl => {
                Some(entry.descriptor.clone())
            }
            Some(_) => {
                entries.remove(name);
                trace!(package = name, "cache entry expired");
                None
            }
            None => None,
        }
    }

    /// Store a descriptor, overwriting and restamping any existing entry
    pub async fn insert(&self, descriptor: PackageDescriptor) {
        let mut entries = self.entries.write().await;
        entries.insert(
            descriptor.name.clone(),
            CachedDescriptor {
                descriptor,
                stored_at: self.clock.now(),
            },
        );
    }

    /// Drop every entry (forced-refresh hook)
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
    }

    /// Number of entries, live or expired
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.len()
    }

    /// Check if the cache is empty
    pub async fn is_empty(&self) -> bool {
        let entries = self.entries.read().await;
        entries.is_empty()
    }
}

impl Default for DescriptorCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    include!("cache.test.rs");
}
