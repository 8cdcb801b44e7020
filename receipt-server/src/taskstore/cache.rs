//! Project-name cache
//!
//! Project names come from a second data source and rarely change; the cache
//! keeps one fetched id → name map until a lookup references an id the map
//! does not cover, at which point the whole map is invalidated and refetched
//! once (invalidate-on-miss). Owned by the task store, not a global.

use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

/// Cached project id → name map
#[derive(Debug, Default)]
pub struct ProjectCache {
    inner: RwLock<Option<HashMap<String, String>>>,
}

impl ProjectCache {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// Return the cached map only when it covers every referenced id
    ///
    /// `None` means the caller must refetch (cold cache or miss).
    pub async fn get_covering(&self, ids: &HashSet<String>) -> Option<HashMap<String, String>> {
        let guard = self.inner.read().await;
        let map = guard.as_ref()?;
        if ids.iter().all(|id| map.contains_key(id)) {
            Some(map.clone())
        } else {
            None
        }
    }

    /// Replace the cached map with a freshly fetched one
    pub async fn store(&self, map: HashMap<String, String>) {
        *self.inner.write().await = Some(map);
    }

    /// Drop the cached map
    pub async fn invalidate(&self) {
        *self.inner.write().await = None;
    }
}
