//! Common types used throughout feedloader
//!
//! This module contains the shared data model: opaque page tokens,
//! fetched pages, and the concrete feed item shipped with the crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Page Token
// ============================================================================

/// Opaque cursor identifying which page to fetch next.
///
/// Tokens are produced by the server and passed back verbatim; they are not
/// required to be numeric, and nothing in the crate parses them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageToken(String);

impl PageToken {
    /// The conventional first-page token
    pub const INITIAL: &'static str = "1";

    /// Create a token from any string-like value
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The first-page token, `"1"`
    pub fn initial() -> Self {
        Self(Self::INITIAL.to_string())
    }

    /// View the raw token value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

// ============================================================================
// Page
// ============================================================================

/// One batch of items returned by a single fetch call.
///
/// Items are immutable once fetched and keep their server order. A `None`
/// next token means no further pages exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in server order
    pub items: Vec<T>,
    /// Token for the following page, or `None` on the terminal page
    pub next_token: Option<PageToken>,
    /// Server-reported total item count across all pages
    pub total_count: u64,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, next_token: Option<PageToken>, total_count: u64) -> Self {
        Self {
            items,
            next_token,
            total_count,
        }
    }

    /// Whether this page is the last one
    pub fn is_terminal(&self) -> bool {
        self.next_token.is_none()
    }

    /// Number of items in this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the page carries no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// Feed Items
// ============================================================================

/// Author of a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Public username
    pub username: String,
}

/// A public project as served by the feed API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Stable unique identifier
    pub id: String,
    /// Project title
    pub title: String,
    /// Project body text
    pub content: String,
    /// URL slug for routing
    pub slug: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Cover image, if any
    pub image_url: Option<String>,
    /// Project author
    pub author: Author,
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for transport retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}
