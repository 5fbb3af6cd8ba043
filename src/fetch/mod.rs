//! Paged fetch boundary
//!
//! A [`PageFetcher`] performs one network request for a given page token and
//! returns a page of items plus the next token (or `None` when the feed is
//! exhausted). Fetchers never retry on their own; retry policy belongs to the
//! [`HttpClient`](crate::http::HttpClient) they are built on.

mod types;

pub use types::PageResponse;

use crate::config::FeedConfig;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::types::{Page, PageToken};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tracing::debug;

/// One fetch call: token in, page out.
///
/// A pure token-to-page mapping with no side effect beyond the network call.
/// Transport failures and non-success responses surface as errors; no partial
/// state is visible to the caller on failure.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Item type carried by fetched pages
    type Item: Send;

    /// Fetch the page identified by `token`
    async fn fetch(&self, token: &PageToken) -> Result<Page<Self::Item>>;
}

/// HTTP page fetcher over the `{page, limit}` → `{items, nextCursor,
/// totalCount}` wire format.
pub struct HttpPageFetcher<T> {
    client: HttpClient,
    path: String,
    page_size: u32,
    _item: PhantomData<fn() -> T>,
}

impl<T> HttpPageFetcher<T> {
    /// Create a fetcher for the endpoint described by `config`
    pub fn new(client: HttpClient, config: &FeedConfig) -> Self {
        Self {
            client,
            path: config.path.clone(),
            page_size: config.page_size,
            _item: PhantomData,
        }
    }

    /// Create a fetcher for an explicit path and page size
    pub fn with_path(client: HttpClient, path: impl Into<String>, page_size: u32) -> Self {
        Self {
            client,
            path: path.into(),
            page_size,
            _item: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for HttpPageFetcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPageFetcher")
            .field("path", &self.path)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<T> PageFetcher for HttpPageFetcher<T>
where
    T: DeserializeOwned + Send + Sync,
{
    type Item = T;

    async fn fetch(&self, token: &PageToken) -> Result<Page<T>> {
        let request = RequestConfig::new()
            .query("page", token.as_str())
            .query("limit", self.page_size.to_string());

        let response: PageResponse<T> = self
            .client
            .get_json_with_config(&self.path, request)
            .await?;

        debug!(
            "Fetched page {}: {} items, next={:?}",
            token,
            response.items.len(),
            response.next_cursor
        );

        Ok(response.into_page())
    }
}
