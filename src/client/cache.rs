// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side query cache keyed by endpoint path.
//!
//! Cached data is never edited in place. Writers either store a fresh
//! response or mark a key stale with [`QueryCache::invalidate`], which
//! makes the next read go back to the server.

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Cache keys used by the client core.
pub mod keys {
    pub const TASKS: &str = "/api/tasks";
    pub const AUTH_USER: &str = "/api/auth/user";
}

struct CacheEntry {
    value: Value,
    stale: bool,
}

/// Shared cache handle.
pub type SharedQueryCache = Arc<QueryCache>;

#[derive(Default)]
pub struct QueryCache {
    entries: DashMap<String, CacheEntry>,
    /// Invalidation counter per key, kept even for keys never populated
    invalidations: DashMap<String, u64>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedQueryCache {
        Arc::new(Self::new())
    }

    /// Fresh value for `key`; `None` if absent or stale.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries
            .get(key)
            .filter(|entry| !entry.stale)
            .map(|entry| entry.value.clone())
    }

    /// Store a fresh value.
    pub fn set(&self, key: &str, value: Value) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                stale: false,
            },
        );
    }

    /// Typed read. A value that no longer decodes is treated as a miss.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key)?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(key, error = %e, "Cached value failed to decode, ignoring");
                None
            }
        }
    }

    /// Typed write.
    pub fn set_as<T: Serialize>(&self, key: &str, value: &T) -> Result<(), serde_json::Error> {
        self.set(key, serde_json::to_value(value)?);
        Ok(())
    }

    /// Mark `key` stale so the next read refetches.
    ///
    /// Returns whether a cached entry existed. The invalidation is counted
    /// either way.
    pub fn invalidate(&self, key: &str) -> bool {
        *self.invalidations.entry(key.to_string()).or_insert(0) += 1;

        let existed = match self.entries.get_mut(key) {
            Some(mut entry) => {
                entry.stale = true;
                true
            }
            None => false,
        };

        tracing::debug!(key, existed, "Invalidated query");
        existed
    }

    /// True if `key` has no fresh value.
    pub fn is_stale(&self, key: &str) -> bool {
        self.entries.get(key).map_or(true, |entry| entry.stale)
    }

    /// How many times `key` has been invalidated.
    pub fn invalidation_count(&self, key: &str) -> u64 {
        self.invalidations.get(key).map(|n| *n).unwrap_or(0)
    }

    /// Drop every cached value. Counters are kept.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_returns_fresh_value() {
        let cache = QueryCache::new();
        cache.set(keys::TASKS, json!({"tasks": []}));

        assert_eq!(cache.get(keys::TASKS), Some(json!({"tasks": []})));
        assert!(!cache.is_stale(keys::TASKS));
    }

    #[test]
    fn test_invalidate_marks_stale() {
        let cache = QueryCache::new();
        cache.set(keys::TASKS, json!(1));

        assert!(cache.invalidate(keys::TASKS));
        assert!(cache.get(keys::TASKS).is_none());
        assert!(cache.is_stale(keys::TASKS));
        assert_eq!(cache.invalidation_count(keys::TASKS), 1);
    }

    #[test]
    fn test_invalidate_missing_key_is_counted() {
        let cache = QueryCache::new();

        assert!(!cache.invalidate(keys::TASKS));
        assert!(!cache.invalidate(keys::TASKS));
        assert_eq!(cache.invalidation_count(keys::TASKS), 2);
        assert_eq!(cache.invalidation_count(keys::AUTH_USER), 0);
    }

    #[test]
    fn test_set_after_invalidate_is_fresh_again() {
        let cache = QueryCache::new();
        cache.set(keys::TASKS, json!(1));
        cache.invalidate(keys::TASKS);
        cache.set(keys::TASKS, json!(2));

        assert_eq!(cache.get(keys::TASKS), Some(json!(2)));
    }

    #[test]
    fn test_typed_round_trip_and_decode_miss() {
        let cache = QueryCache::new();
        cache.set_as(keys::AUTH_USER, &vec![1u32, 2, 3]).unwrap();

        assert_eq!(cache.get_as::<Vec<u32>>(keys::AUTH_USER), Some(vec![1, 2, 3]));
        assert_eq!(cache.get_as::<String>(keys::AUTH_USER), None);
    }

    #[test]
    fn test_clear_keeps_counters() {
        let cache = QueryCache::new();
        cache.set(keys::TASKS, json!(1));
        cache.invalidate(keys::TASKS);
        cache.clear();

        assert!(cache.is_stale(keys::TASKS));
        assert_eq!(cache.invalidation_count(keys::TASKS), 1);
    }
}
