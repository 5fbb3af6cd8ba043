//! Presenter wiring
//!
//! Glue between the sensor, the controller, and a render callback:
//! rising-edge visibility events become `request_next` calls, and every
//! state change is projected to a [`ViewState`] and handed to the renderer.
//! The presenter itself holds no pagination state; the controller's state
//! machine is the only error channel it sees.

mod types;

pub use types::{ProjectCard, ViewState};

use crate::controller::{LoadState, PaginationController, Snapshot};
use crate::fetch::PageFetcher;
use crate::sensor::VisibilitySensor;
use crate::types::Project;
use tracing::debug;

/// Project an item to its display record
pub fn project_card(project: &Project) -> ProjectCard {
    ProjectCard {
        title: project.title.clone(),
        content: project.content.clone(),
        image_url: project.image_url.clone(),
        author: project.author.username.clone(),
        created_at: project.created_at.format("%B %-d, %Y").to_string(),
    }
}

/// Map a controller snapshot to what the view should show
pub fn view_state(snapshot: &Snapshot<Project>) -> ViewState {
    match &snapshot.state {
        LoadState::LoadingInitial => ViewState::Skeleton,
        LoadState::Error(message) => ViewState::Error(message.clone()),
        state => ViewState::List {
            cards: snapshot.items.iter().map(project_card).collect(),
            loading_more: matches!(*state, LoadState::LoadingMore),
        },
    }
}

/// Drives a controller from sensor events and renders through a callback
pub struct Presenter<F: PageFetcher<Item = Project>> {
    controller: PaginationController<F>,
    sensor: VisibilitySensor,
    render: Box<dyn FnMut(&ViewState) + Send>,
}

impl<F: PageFetcher<Item = Project>> Presenter<F> {
    /// Wire a controller, an attached sensor, and a render callback together
    pub fn new(
        controller: PaginationController<F>,
        sensor: VisibilitySensor,
        render: impl FnMut(&ViewState) + Send + 'static,
    ) -> Self {
        Self {
            controller,
            sensor,
            render: Box::new(render),
        }
    }

    /// Run until the sentinel goes away.
    ///
    /// Issues the initial load immediately, then requests more on each
    /// rising-edge visibility event. Repeated triggers while a fetch is in
    /// flight are no-ops inside the controller, so rendering is the only
    /// thing that happens on every event.
    pub async fn run(mut self) {
        self.controller.request_next().await;
        self.render_current().await;

        while let Some(visible) = self.sensor.next_transition().await {
            if visible {
                debug!("Sentinel visible, requesting next page");
                self.controller.request_next().await;
            }
            self.render_current().await;
        }
    }

    async fn render_current(&mut self) {
        let snapshot = self.controller.snapshot().await;
        (self.render)(&view_state(&snapshot));
    }
}
