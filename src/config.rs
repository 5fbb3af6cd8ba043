//! Feed configuration
//!
//! Policy values for a feed: page size, initial token, transport retry
//! budget, and the staleness window for cached controllers. All values are
//! configurable; the defaults match the public projects feed.

use crate::error::{Error, Result};
use crate::types::PageToken;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default number of items requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 9;

/// Default transport retry budget
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default staleness window for cached feeds, in seconds
pub const DEFAULT_STALE_AFTER_SECS: u64 = 5 * 60;

/// Configuration for a paged feed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Request path of the paged endpoint
    pub path: String,
    /// Items requested per page (`limit` query parameter)
    pub page_size: u32,
    /// Token used for the first fetch when no prior token exists
    pub initial_token: String,
    /// Transport retry budget for a single page fetch
    pub max_retries: u32,
    /// Seconds a cached controller's pages are considered fresh
    pub stale_after_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            path: "/projects/public".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            initial_token: PageToken::INITIAL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            stale_after_secs: DEFAULT_STALE_AFTER_SECS,
        }
    }
}

impl FeedConfig {
    /// Load a config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// The initial token as a typed value
    pub fn initial_token(&self) -> PageToken {
        PageToken::new(&self.initial_token)
    }

    /// The staleness window as a duration
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_secs)
    }

    /// Validate field ranges
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::InvalidConfigValue {
                field: "page_size".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.initial_token.is_empty() {
            return Err(Error::InvalidConfigValue {
                field: "initial_token".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FeedConfig::default();
        assert_eq!(config.page_size, 9);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.stale_after(), Duration::from_secs(300));
        assert_eq!(config.initial_token(), PageToken::initial());
    }

    #[test]
    fn test_from_yaml() {
        let config = FeedConfig::from_yaml_str(
            r"
path: /v2/projects
page_size: 24
stale_after_secs: 60
",
        )
        .unwrap();

        assert_eq!(config.path, "/v2/projects");
        assert_eq!(config.page_size, 24);
        assert_eq!(config.stale_after_secs, 60);
        // Unspecified fields keep their defaults
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let result = FeedConfig::from_yaml_str("page_size: 0");
        assert!(matches!(
            result,
            Err(Error::InvalidConfigValue { ref field, .. }) if field == "page_size"
        ));
    }

    #[test]
    fn test_validate_rejects_empty_token() {
        let result = FeedConfig::from_yaml_str("initial_token: ''");
        assert!(result.is_err());
    }
}
