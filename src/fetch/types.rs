//! Wire types for the paged fetch boundary

use crate::types::{Page, PageToken};
use serde::{Deserialize, Deserializer};

/// Response body of one paged request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    /// Items in server order
    pub items: Vec<T>,
    /// Cursor for the following page; `null` on the terminal page
    #[serde(default, deserialize_with = "deserialize_cursor")]
    pub next_cursor: Option<PageToken>,
    /// Total item count across all pages
    #[serde(default)]
    pub total_count: u64,
}

impl<T> PageResponse<T> {
    /// Convert the wire shape into the owned page model
    pub fn into_page(self) -> Page<T> {
        Page::new(self.items, self.next_cursor, self.total_count)
    }
}

/// Accept string or numeric cursors; the server is free to use either.
fn deserialize_cursor<'de, D>(deserializer: D) -> Result<Option<PageToken>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(PageToken::new(s))),
        Some(serde_json::Value::Number(n)) => Ok(Some(PageToken::new(n.to_string()))),
        Some(other) => Err(serde::de::Error::custom(format!(
            "nextCursor must be a string, number, or null, got {other}"
        ))),
    }
}
