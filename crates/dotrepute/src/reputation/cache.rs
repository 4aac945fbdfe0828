//! Time-bounded response cache shared by the AI entry points.
//!
//! Entries are never invalidated early; freshness is checked on every read and
//! a stale entry is dropped at that point. There is no background sweep.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// Default freshness window for cached AI responses.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Source of "now" so expiry can be driven deterministically in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    created_at: DateTime<Utc>,
}

pub struct ResponseCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> ResponseCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value while it is younger than the TTL.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.lock();

        // A clock that stepped backwards yields a negative delta; treat it as fresh.
        let age = (now - entries.get(key)?.created_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
        if age >= self.ttl {
            entries.remove(key);
            tracing::debug!(key, age_secs = age.as_secs(), "cache entry expired");
            return None;
        }

        tracing::debug!(key, age_secs = age.as_secs(), "cache hit");
        entries.get(key).map(|entry| entry.value.clone())
    }

    /// Stores a value stamped with the current time. Last writer wins.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        let created_at = self.clock.now();
        self.lock()
            .insert(key.into(), CacheEntry { value, created_at });
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // Entries are replaced whole, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V: Clone> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl<V> std::fmt::Debug for ResponseCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

/// Manually advanced clock for exercising expiry.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn minutes(n: i64) -> TimeDelta {
        TimeDelta::minutes(n)
    }

    fn fixture() -> (Arc<ManualClock>, ResponseCache<String>) {
        let start = Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let cache = ResponseCache::with_clock(DEFAULT_TTL, clock.clone());
        (clock, cache)
    }

    #[test]
    fn returns_fresh_entries() {
        let (clock, cache) = fixture();
        cache.insert("15oF4u", "cached".to_string());

        clock.advance(minutes(4) + TimeDelta::seconds(59));
        assert_eq!(cache.get("15oF4u").as_deref(), Some("cached"));
    }

    #[test]
    fn missing_key_is_a_miss() {
        let (_, cache) = fixture();
        assert!(cache.get("unknown").is_none());
    }

    #[test]
    fn stale_entries_read_as_miss_and_are_dropped() {
        let (clock, cache) = fixture();
        cache.insert("15oF4u", "cached".to_string());
        cache.insert("other", "cached".to_string());

        clock.advance(minutes(5));
        assert!(cache.get("15oF4u").is_none());
        assert_eq!(cache.len(), 1, "only the read entry is evicted");
    }

    #[test]
    fn reinsert_refreshes_timestamp() {
        let (clock, cache) = fixture();
        cache.insert("key", "first".to_string());
        clock.advance(minutes(3));
        cache.insert("key", "second".to_string());
        clock.advance(minutes(3));

        assert_eq!(cache.get("key").as_deref(), Some("second"));
    }

    #[test]
    fn keys_are_case_sensitive() {
        let (_, cache) = fixture();
        cache.insert("addr:What is my score?", "answer".to_string());
        assert!(cache.get("addr:what is my score?").is_none());
    }

    #[test]
    fn clear_empties_the_cache() {
        let (_, cache) = fixture();
        cache.insert("a", "1".to_string());
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
    }
}
