//! Time-bounded caches for weather lookups
//!
//! Entries are keyed by a normalized `(city, state)` pair and expire after a
//! fixed ttl measured against an injectable clock.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Source of the current time
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Normalize a city/state pair into a cache key
///
/// `" San  Antonio ", "TX"` becomes `san_antonio|tx`.
pub fn city_key(city: &str, state: &str) -> String {
    let city = city
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("{}|{}", city, state.trim().to_lowercase())
}

struct Entry<V> {
    value: V,
    stored_at: DateTime<Utc>,
}

/// Key/value cache whose entries expire after `ttl`
pub struct TtlCache<V, C: Clock = SystemClock> {
    entries: HashMap<String, Entry<V>>,
    ttl: Duration,
    clock: C,
}

impl<V: Clone, C: Clock> TtlCache<V, C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    /// Value stored under `key` if it is younger than the ttl
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.entries.get(key)?;
        let age = self.clock.now().signed_duration_since(entry.stored_at);
        let fresh = age
            .to_std()
            .map(|age| age < self.ttl)
            .unwrap_or(true);
        fresh.then(|| entry.value.clone())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let stored_at = self.clock.now();
        self.entries.insert(key.into(), Entry { value, stored_at });
    }

    pub fn invalidate(&mut self, key: &str) -> Option<V> {
        self.entries.remove(key).map(|e| e.value)
    }

    /// Number of stored entries, expired or not
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
