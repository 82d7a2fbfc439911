//! Query cache
//!
//! Read-through cache of list/detail queries keyed by [`QueryKey`]. Entries
//! are JSON snapshots of the last authoritative fetch. Mutations never write
//! here: they invalidate by key prefix and the next read refetches.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientResult;

/// Hierarchical cache key (`["businesses", "<id>"]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Single-segment key
    pub fn root(name: &str) -> Self {
        Self(vec![name.to_string()])
    }

    /// Key extended by one segment
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Whether `prefix` covers this key.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

/// Client-side query cache
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<QueryKey, Value>>,
    // Bumped on every invalidation; a fetch that raced one is not stored.
    generation: AtomicU64,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value, or `fetch` on a miss.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &QueryKey, fetch: F) -> ClientResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        if let Some(cached) = self.peek::<T>(key) {
            tracing::trace!(key = %key, "Cache hit");
            return Ok(cached);
        }

        let generation = self.generation.load(Ordering::Acquire);
        let value = fetch().await?;

        if self.generation.load(Ordering::Acquire) == generation {
            self.entries
                .write()
                .insert(key.clone(), serde_json::to_value(&value)?);
        } else {
            tracing::debug!(key = %key, "Discarding fetch that raced an invalidation");
        }
        Ok(value)
    }

    /// Cached value without fetching. A snapshot that no longer matches `T`
    /// reads as a miss.
    pub fn peek<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let entries = self.entries.read();
        entries
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Drop every entry under `prefix`. Returns how many were removed.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        self.generation.fetch_add(1, Ordering::AcqRel);
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - entries.len();
        tracing::debug!(prefix = %prefix, removed, "Cache invalidated");
        removed
    }

    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
