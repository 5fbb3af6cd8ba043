//! Keyed feed store
//!
//! Controllers accumulate pages for the lifetime of one view; across views,
//! the same logical feed is cached here under a key. An entry stays fresh
//! for a fixed window (default 5 minutes). Past the window a lookup builds a
//! brand-new controller — aged pages are never patched incrementally — and
//! the stale controller is discarded, so any fetch it still has in flight
//! completes into a no-op. Invalidation is explicit, never implicit
//! memoization.

use crate::config::FeedConfig;
use crate::controller::PaginationController;
use crate::fetch::PageFetcher;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};

struct CachedFeed<F: PageFetcher> {
    controller: PaginationController<F>,
    created_at: Instant,
}

impl<F: PageFetcher> CachedFeed<F> {
    fn is_stale(&self, stale_after: Duration) -> bool {
        self.created_at.elapsed() >= stale_after
    }
}

/// Cache of pagination controllers keyed by logical feed
pub struct FeedStore<F: PageFetcher> {
    feeds: RwLock<HashMap<String, CachedFeed<F>>>,
    stale_after: Duration,
}

impl<F: PageFetcher> FeedStore<F> {
    /// Create a store with the given staleness window
    pub fn new(stale_after: Duration) -> Self {
        Self {
            feeds: RwLock::new(HashMap::new()),
            stale_after,
        }
    }

    /// Create a store using the staleness window from `config`
    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(config.stale_after())
    }

    /// Look up the controller for `key`, building a fresh one when there is
    /// no entry or the entry has aged out.
    ///
    /// Returns a handle to the cached controller while it is fresh, so every
    /// view of the same feed shares one accumulated page log within the
    /// window.
    pub async fn get_or_create(
        &self,
        key: &str,
        make: impl FnOnce() -> PaginationController<F>,
    ) -> PaginationController<F> {
        let mut feeds = self.feeds.write().await;

        if let Some(cached) = feeds.get(key) {
            if !cached.is_stale(self.stale_after) {
                debug!("Feed '{key}' served from store");
                return cached.controller.clone();
            }
            info!("Feed '{key}' is stale, rebuilding");
        }

        if let Some(stale) = feeds.remove(key) {
            stale.controller.discard().await;
        }

        let controller = make();
        feeds.insert(
            key.to_string(),
            CachedFeed {
                controller: controller.clone(),
                created_at: Instant::now(),
            },
        );
        controller
    }

    /// Look up the controller for `key` without building one. Stale entries
    /// are treated as absent.
    pub async fn get(&self, key: &str) -> Option<PaginationController<F>> {
        let feeds = self.feeds.read().await;
        feeds
            .get(key)
            .filter(|cached| !cached.is_stale(self.stale_after))
            .map(|cached| cached.controller.clone())
    }

    /// Drop the entry for `key`, discarding its controller. Returns whether
    /// an entry existed.
    pub async fn invalidate(&self, key: &str) -> bool {
        let removed = self.feeds.write().await.remove(key);
        match removed {
            Some(cached) => {
                info!("Feed '{key}' invalidated");
                cached.controller.discard().await;
                true
            }
            None => false,
        }
    }

    /// Drop every aged-out entry, discarding their controllers
    pub async fn evict_stale(&self) {
        let mut feeds = self.feeds.write().await;
        let stale_keys: Vec<String> = feeds
            .iter()
            .filter(|(_, cached)| cached.is_stale(self.stale_after))
            .map(|(key, _)| key.clone())
            .collect();

        for key in stale_keys {
            if let Some(cached) = feeds.remove(&key) {
                info!("Feed '{key}' evicted as stale");
                cached.controller.discard().await;
            }
        }
    }

    /// Number of entries, stale ones included
    pub async fn len(&self) -> usize {
        self.feeds.read().await.len()
    }

    /// Whether the store holds no entries
    pub async fn is_empty(&self) -> bool {
        self.feeds.read().await.is_empty()
    }
}

impl<F: PageFetcher> std::fmt::Debug for FeedStore<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedStore")
            .field("stale_after", &self.stale_after)
            .finish_non_exhaustive()
    }
}
