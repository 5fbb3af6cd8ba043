//! Controller state types

use serde::Serialize;

/// Loading state of a pagination controller. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// No fetch in flight, more pages may exist
    Idle,
    /// First page fetch in flight
    LoadingInitial,
    /// Follow-up page fetch in flight
    LoadingMore,
    /// Last fetch failed; the pending token is retained for retry
    Error(String),
    /// Terminal: the last page has been absorbed, no further fetches
    Exhausted,
}

impl LoadState {
    /// Whether a fetch is currently in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::LoadingInitial | Self::LoadingMore)
    }

    /// Whether the controller is in the recoverable error state
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Whether the feed has no further pages
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// Read-only view of a controller: the flattened item list in fetch order
/// plus the current load state.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    /// All items across absorbed pages, in fetch order
    pub items: Vec<T>,
    /// Current load state
    pub state: LoadState,
    /// Latest server-reported total count, once a page has been absorbed
    pub total_count: Option<u64>,
}

impl<T> Snapshot<T> {
    /// Number of items absorbed so far
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items have been absorbed yet
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
