//! Explicit TTL cache for query results.
//!
//! Dashboard pages re-run the same store queries on every render, so results
//! are memoized for a fixed time-to-live. The cache is an explicit component
//! that collaborators opt into; the metrics/formatting functions themselves
//! stay cache-free and pure. Entries are keyed by a caller-chosen scope (the
//! query's identity) plus its serialized arguments, so any `Serialize`
//! argument bundle works as a key.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use control_tower_metrics::cache::TtlCache;
//!
//! # fn main() -> Result<(), control_tower_metrics::MetricsError> {
//! let mut cache: TtlCache<u64> = TtlCache::new(Duration::from_secs(60));
//!
//! let total = cache.get_or_compute("loan_totals", &("APEX", "2025-01"), || Ok(42))?;
//! assert_eq!(total, 42);
//!
//! // Second call within the TTL is served from the cache.
//! let again = cache.get_or_compute("loan_totals", &("APEX", "2025-01"), || {
//!     panic!("should not recompute")
//! })?;
//! assert_eq!(again, 42);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::MetricsResult;

/// TTL applied when none is given, matching the dashboards' one-hour cache.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// A map from `(scope, serialized arguments)` to a value with an expiry.
///
/// The TTL is fixed at construction and applies to every entry. Expired
/// entries are recomputed in place by [`TtlCache::get_or_compute`] or swept
/// by [`TtlCache::purge_expired`].
#[derive(Debug)]
pub struct TtlCache<V> {
    ttl: Duration,
    entries: HashMap<(String, String), Entry<V>>,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache with the given time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Create a cache with [`DEFAULT_TTL`].
    pub fn with_default_ttl() -> Self {
        Self::new(DEFAULT_TTL)
    }

    /// Look up a live entry.
    ///
    /// Returns `None` for a missing or expired entry. Fails only if `args`
    /// cannot be serialized into a key.
    pub fn get(&self, scope: &str, args: &impl Serialize) -> MetricsResult<Option<V>> {
        let key = cache_key(scope, args)?;
        Ok(self
            .entries
            .get(&key)
            .filter(|e| e.expires_at > Instant::now())
            .map(|e| e.value.clone()))
    }

    /// Insert a value, replacing any previous entry and restarting its TTL.
    pub fn insert(&mut self, scope: &str, args: &impl Serialize, value: V) -> MetricsResult<()> {
        let key = cache_key(scope, args)?;
        self.entries.insert(
            key,
            Entry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
        Ok(())
    }

    /// Remove a single entry, returning its value if it was present (live or
    /// expired).
    pub fn remove(&mut self, scope: &str, args: &impl Serialize) -> MetricsResult<Option<V>> {
        let key = cache_key(scope, args)?;
        Ok(self.entries.remove(&key).map(|e| e.value))
    }

    /// Return the cached value, or compute, store, and return it.
    ///
    /// `compute` runs when the entry is missing or expired; its error
    /// propagates without caching, so a failed query is retried on the next
    /// call.
    pub fn get_or_compute(
        &mut self,
        scope: &str,
        args: &impl Serialize,
        compute: impl FnOnce() -> MetricsResult<V>,
    ) -> MetricsResult<V> {
        let key = cache_key(scope, args)?;
        if let Some(entry) = self.entries.get(&key) {
            if entry.expires_at > Instant::now() {
                return Ok(entry.value.clone());
            }
        }

        let value = compute()?;
        self.entries.insert(
            key,
            Entry {
                value: value.clone(),
                expires_at: Instant::now() + self.ttl,
            },
        );
        Ok(value)
    }

    /// Drop every entry (the dashboards' "clear all caches" action).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop expired entries, keeping live ones.
    pub fn purge_expired(&mut self) {
        let now = Instant::now();
        self.entries.retain(|_, e| e.expires_at > now);
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn cache_key(scope: &str, args: &impl Serialize) -> MetricsResult<(String, String)> {
    Ok((scope.to_owned(), serde_json::to_string(args)?))
}
