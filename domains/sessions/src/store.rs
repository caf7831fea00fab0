//! Expiring in-memory store
//!
//! An entry carries its write time, and every read performs an explicit
//! TTL check against the clock. An expired entry is treated as absent and
//! removed on sight, so a later write starts fresh.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

/// A stored value with its write timestamp
#[derive(Debug, Clone)]
struct ExpiringEntry<T> {
    value: T,
    stored_at: DateTime<Utc>,
}

impl<T> ExpiringEntry<T> {
    fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.stored_at > ttl
    }
}

/// Keyed in-memory store whose entries expire a fixed duration after their
/// last write
pub struct TtlStore<T> {
    entries: DashMap<String, ExpiringEntry<T>>,
    ttl: Duration,
}

impl<T: Clone> TtlStore<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Insert or replace, restarting the entry's TTL
    pub fn insert(&self, key: impl Into<String>, value: T) {
        self.insert_at(key, value, Utc::now());
    }

    /// Insert with an explicit write timestamp (tests age entries this way)
    pub fn insert_at(&self, key: impl Into<String>, value: T, stored_at: DateTime<Utc>) {
        self.entries
            .insert(key.into(), ExpiringEntry { value, stored_at });
    }

    /// Read with an explicit TTL check. An expired entry is removed and
    /// reported absent.
    pub fn get(&self, key: &str) -> Option<T> {
        let now = Utc::now();
        {
            let entry = self.entries.get(key)?;
            if !entry.is_expired(self.ttl, now) {
                return Some(entry.value.clone());
            }
        }
        self.entries
            .remove_if(key, |_, entry| entry.is_expired(self.ttl, now));
        None
    }

    pub fn remove(&self, key: &str) -> Option<T> {
        self.entries.remove(key).map(|(_, entry)| entry.value)
    }

    /// Drop every expired entry; returns how many were removed. Run
    /// periodically so abandoned sessions do not accumulate.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| !entry.is_expired(self.ttl, now));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
