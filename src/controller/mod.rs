//! Incremental pagination controller
//!
//! The core of the crate, split in two layers:
//!
//! - [`ControllerCore`] — a pure state machine over absorbed pages, the
//!   current [`LoadState`], and the pending token. The at-most-one-fetch
//!   invariant is expressed as an explicit in-flight state, so it is
//!   verifiable without a network.
//! - [`PaginationController`] — the async driver binding a
//!   [`PageFetcher`](crate::fetch::PageFetcher) to the machine. It begins a
//!   fetch under a short-lived lock, awaits the fetcher outside it, and
//!   absorbs the outcome on completion.
//!
//! Pages are only ever appended, in fetch order; the controller never
//! deduplicates or reorders items. A fetched page with no next token moves
//! the machine to `Exhausted`, after which no further fetches are issued.

mod types;

pub use types::{LoadState, Snapshot};

use crate::config::FeedConfig;
use crate::fetch::PageFetcher;
use crate::types::{Page, PageToken};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

// ============================================================================
// State machine
// ============================================================================

/// Pure pagination state machine.
///
/// Owns the accumulated pages and decides when a fetch may begin. All
/// transitions happen on discrete events: `begin_fetch`, `absorb_page`,
/// `absorb_error`.
#[derive(Debug)]
pub struct ControllerCore<T> {
    pages: Vec<Page<T>>,
    state: LoadState,
    next_token: Option<PageToken>,
    total_count: Option<u64>,
    discarded: bool,
}

impl<T> ControllerCore<T> {
    /// Create a machine that will fetch its first page with `initial_token`
    pub fn new(initial_token: PageToken) -> Self {
        Self {
            pages: Vec::new(),
            state: LoadState::Idle,
            next_token: Some(initial_token),
            total_count: None,
            discarded: false,
        }
    }

    /// Gate and begin a fetch.
    ///
    /// Returns the token to fetch if the machine is `Idle` (or in the
    /// recoverable `Error` state) with a pending token, moving to
    /// `LoadingInitial` or `LoadingMore`. Returns `None` — a no-op — while a
    /// fetch is already in flight, once exhausted, or after discard. This
    /// gating is the sole concurrency guard: at most one fetch can be begun
    /// before a matching absorb.
    pub fn begin_fetch(&mut self) -> Option<PageToken> {
        if self.discarded {
            return None;
        }
        match self.state {
            LoadState::Idle | LoadState::Error(_) => {}
            LoadState::LoadingInitial | LoadState::LoadingMore | LoadState::Exhausted => {
                return None;
            }
        }

        let token = self.next_token.clone()?;
        self.state = if self.pages.is_empty() {
            LoadState::LoadingInitial
        } else {
            LoadState::LoadingMore
        };
        Some(token)
    }

    /// Absorb a successfully fetched page.
    ///
    /// Appends the page, advances the pending token, and settles to `Idle`
    /// or `Exhausted`. A completion arriving after discard (or without a
    /// matching `begin_fetch`) is dropped silently.
    pub fn absorb_page(&mut self, page: Page<T>) {
        if self.discarded || !self.state.is_loading() {
            debug!("Dropping page completion for inactive controller");
            return;
        }

        self.total_count = Some(page.total_count);
        self.next_token = page.next_token.clone();
        self.pages.push(page);

        self.state = if self.next_token.is_none() {
            LoadState::Exhausted
        } else {
            LoadState::Idle
        };
    }

    /// Absorb a fetch failure.
    ///
    /// Moves to `Error` and leaves the pending token untouched, so the next
    /// `begin_fetch` retries the same page. No completed page is lost.
    pub fn absorb_error(&mut self, message: impl Into<String>) {
        if self.discarded || !self.state.is_loading() {
            debug!("Dropping error completion for inactive controller");
            return;
        }
        self.state = LoadState::Error(message.into());
    }

    /// Current load state
    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    /// Pending token for the next fetch, if any
    pub fn next_token(&self) -> Option<&PageToken> {
        self.next_token.as_ref()
    }

    /// Number of pages absorbed so far
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Mark the machine discarded. Later completions become no-ops.
    pub fn discard(&mut self) {
        self.discarded = true;
    }

    /// Whether the machine has been discarded
    pub fn is_discarded(&self) -> bool {
        self.discarded
    }
}

impl<T: Clone> ControllerCore<T> {
    /// Flattened, order-preserving view of all absorbed items plus the
    /// current state. Read-only; safe to call at any time, mid-fetch
    /// included.
    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot {
            items: self
                .pages
                .iter()
                .flat_map(|page| page.items.iter().cloned())
                .collect(),
            state: self.state.clone(),
            total_count: self.total_count,
        }
    }
}

// ============================================================================
// Async driver
// ============================================================================

/// Async pagination controller: a [`ControllerCore`] driven by a
/// [`PageFetcher`].
///
/// Cloning yields another handle to the same controller; each feed view
/// should own an independent instance.
pub struct PaginationController<F: PageFetcher> {
    core: Arc<RwLock<ControllerCore<F::Item>>>,
    fetcher: Arc<F>,
}

impl<F: PageFetcher> Clone for PaginationController<F> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            fetcher: Arc::clone(&self.fetcher),
        }
    }
}

impl<F: PageFetcher> std::fmt::Debug for PaginationController<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationController").finish_non_exhaustive()
    }
}

impl<F: PageFetcher> PaginationController<F> {
    /// Create a controller that starts from `initial_token`
    pub fn new(fetcher: F, initial_token: PageToken) -> Self {
        Self {
            core: Arc::new(RwLock::new(ControllerCore::new(initial_token))),
            fetcher: Arc::new(fetcher),
        }
    }

    /// Create a controller using the initial token from `config`
    pub fn from_config(fetcher: F, config: &FeedConfig) -> Self {
        Self::new(fetcher, config.initial_token())
    }

    /// Request the next page.
    ///
    /// Returns `true` if a fetch was issued and has completed (successfully
    /// or not), `false` if the call was a no-op: a fetch was already in
    /// flight, the feed is exhausted, or the controller was discarded. The
    /// fetch is awaited outside the state lock, so concurrent callers see
    /// the in-flight state and back off rather than duplicating the request.
    ///
    /// Fetch failures do not propagate as errors; they land in
    /// [`LoadState::Error`], the sole error channel the presenter sees.
    pub async fn request_next(&self) -> bool {
        let token = {
            let mut core = self.core.write().await;
            core.begin_fetch()
        };
        let Some(token) = token else {
            return false;
        };

        match self.fetcher.fetch(&token).await {
            Ok(page) => {
                debug!("Absorbing page for token {token}: {} items", page.len());
                self.core.write().await.absorb_page(page);
            }
            Err(e) => {
                warn!("Page fetch for token {token} failed: {e}");
                self.core.write().await.absorb_error(e.to_string());
            }
        }
        true
    }

    /// Current load state
    pub async fn load_state(&self) -> LoadState {
        self.core.read().await.load_state().clone()
    }

    /// Whether the feed has no further pages
    pub async fn is_exhausted(&self) -> bool {
        self.core.read().await.load_state().is_exhausted()
    }

    /// Number of pages absorbed so far
    pub async fn page_count(&self) -> usize {
        self.core.read().await.page_count()
    }

    /// Discard the controller. An in-flight fetch still runs to completion,
    /// but its outcome is dropped on arrival.
    pub async fn discard(&self) {
        self.core.write().await.discard();
    }
}

impl<F: PageFetcher> PaginationController<F>
where
    F::Item: Clone,
{
    /// Read-only flattened view; see [`ControllerCore::snapshot`]
    pub async fn snapshot(&self) -> Snapshot<F::Item> {
        self.core.read().await.snapshot()
    }
}

#[cfg(test)]
mod tests;
