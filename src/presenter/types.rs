//! Display-side types

use serde::Serialize;

/// What an item looks like once projected for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCard {
    /// Project title
    pub title: String,
    /// Project body text
    pub content: String,
    /// Cover image, if any
    pub image_url: Option<String>,
    /// Author username
    pub author: String,
    /// Creation date formatted as a long date, e.g. "March 1, 2024"
    pub created_at: String,
}

/// What the view should show right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Initial load in flight: full skeleton placeholder
    Skeleton,
    /// Last fetch failed: plain error text
    Error(String),
    /// The accumulated card list; `loading_more` drives the trailing
    /// skeleton while a follow-up fetch is in flight
    List {
        cards: Vec<ProjectCard>,
        loading_more: bool,
    },
}
