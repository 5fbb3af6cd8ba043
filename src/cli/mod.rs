//! Command-line interface
//!
//! Fetches a public feed page by page and prints the projected cards, which
//! exercises the whole stack: transport, fetcher, controller, projection.

use crate::config::FeedConfig;
use crate::controller::{LoadState, PaginationController};
use crate::error::{Error, Result};
use crate::fetch::HttpPageFetcher;
use crate::http::{HttpClient, HttpClientConfig};
use crate::presenter::project_card;
use crate::types::Project;
use clap::Parser;
use tracing::info;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "feedloader", version, about = "Walk a paged feed and print its items")]
pub struct Cli {
    /// Base URL of the feed API
    pub base_url: String,

    /// Request path of the paged endpoint
    #[arg(long, default_value = "/projects/public")]
    pub path: String,

    /// Items requested per page
    #[arg(long, default_value_t = 9)]
    pub page_size: u32,

    /// Token for the first page
    #[arg(long, default_value = "1")]
    pub initial_token: String,

    /// Transport retry budget
    #[arg(long, default_value_t = 3)]
    pub max_retries: u32,

    /// Stop after this many pages; 0 walks the feed until exhausted
    #[arg(long, default_value_t = 0)]
    pub max_pages: usize,
}

/// Executes the CLI
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the parsed arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Walk the feed, printing each newly absorbed card
    pub async fn run(&self) -> Result<()> {
        let config = FeedConfig {
            path: self.cli.path.clone(),
            page_size: self.cli.page_size,
            initial_token: self.cli.initial_token.clone(),
            max_retries: self.cli.max_retries,
            ..FeedConfig::default()
        };
        config.validate()?;

        let client = HttpClient::with_config(
            HttpClientConfig::builder()
                .base_url(&self.cli.base_url)
                .max_retries(config.max_retries)
                .build(),
        );
        let fetcher: HttpPageFetcher<Project> = HttpPageFetcher::new(client, &config);
        let controller = PaginationController::from_config(fetcher, &config);

        let mut printed = 0;
        loop {
            controller.request_next().await;
            let snapshot = controller.snapshot().await;

            if let LoadState::Error(message) = &snapshot.state {
                return Err(Error::Other(message.clone()));
            }

            for project in &snapshot.items[printed..] {
                let card = project_card(project);
                println!("{} by {} ({})", card.title, card.author, card.created_at);
            }
            printed = snapshot.items.len();

            let pages = controller.page_count().await;
            if snapshot.state.is_exhausted() {
                info!(
                    "Feed exhausted: {printed} items in {pages} pages (server total {})",
                    snapshot.total_count.unwrap_or(0)
                );
                break;
            }
            if self.cli.max_pages > 0 && pages >= self.cli.max_pages {
                info!("Stopping after {pages} pages as requested");
                break;
            }
        }

        Ok(())
    }
}
