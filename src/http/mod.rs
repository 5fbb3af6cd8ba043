//! HTTP transport collaborator
//!
//! The retrying client that page fetchers are built on. Retry policy lives
//! here, not in the fetchers: a fixed attempt budget with configurable
//! backoff, and no caller-visible partial state on failure.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
