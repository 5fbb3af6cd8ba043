//! # feedloader
//!
//! An incremental pagination controller for infinite-scroll feeds.
//!
//! The crate coordinates three collaborators around a growing in-memory
//! result set: a visibility trigger (scroll-driven), an asynchronous
//! paged-fetch boundary, and a render callback. The controller enforces
//! at-most-one-fetch-in-flight by state-machine gating and a stale-data
//! refresh policy through a keyed store.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use feedloader::{
//!     FeedConfig, HttpClient, HttpClientConfig, HttpPageFetcher,
//!     PaginationController, Project, Result,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = FeedConfig::default();
//!     let client = HttpClient::with_config(
//!         HttpClientConfig::builder()
//!             .base_url("https://api.example.com")
//!             .build(),
//!     );
//!     let fetcher: HttpPageFetcher<Project> = HttpPageFetcher::new(client, &config);
//!     let controller = PaginationController::from_config(fetcher, &config);
//!
//!     controller.request_next().await;
//!     let snapshot = controller.snapshot().await;
//!     println!("{} items loaded", snapshot.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                        Presenter                          │
//! │  sensor rising edge → request_next()    snapshot → render │
//! └───────────────────────────────────────────────────────────┘
//!                │                               │
//! ┌──────────────┴─────────┬─────────────────────┴────────────┐
//! │   VisibilitySensor     │      PaginationController        │
//! │   attach / detach      │  Idle ⇄ Loading ⇄ Error          │
//! │   raw transitions      │  → Exhausted                     │
//! ├────────────────────────┼──────────────────────────────────┤
//! │      FeedStore         │          PageFetcher             │
//! │  staleness / eviction  │  token → page  (HTTP + retry)    │
//! └────────────────────────┴──────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and the shipped feed item
pub mod types;

/// Feed policy configuration
pub mod config;

/// HTTP transport with retry
pub mod http;

/// Paged fetch boundary
pub mod fetch;

/// The pagination state machine and its async driver
pub mod controller;

/// Visibility sensing
pub mod sensor;

/// Presenter wiring and display projection
pub mod presenter;

/// Keyed feed store with staleness
pub mod store;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::FeedConfig;
pub use controller::{ControllerCore, LoadState, PaginationController, Snapshot};
pub use error::{Error, Result};
pub use fetch::{HttpPageFetcher, PageFetcher, PageResponse};
pub use http::{HttpClient, HttpClientConfig};
pub use presenter::{Presenter, ProjectCard, ViewState};
pub use sensor::{Sentinel, VisibilitySensor};
pub use store::FeedStore;
pub use types::{Author, BackoffType, Page, PageToken, Project};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
