//! Headless host for tests and the `simulate` command.
//!
//! [`SimHost`] wires a [`SimPage`], [`SimEvents`] and [`SimClock`] together and
//! adds the glue a browser would provide for free, such as firing `scroll`
//! after a handler moved the window.

mod clock;
mod events;
mod page;

pub use clock::SimClock;
pub use events::SimEvents;
pub use page::{DownloadRequest, SimPage};

use anyhow::{Context, Result};
use std::rc::Rc;

use super::{Event, EventKind, EventTarget, Host, NodeId, Page, ScrollBehavior, Storage};
use crate::host::storage::MemoryStorage;
use crate::models::PageLayout;

/// Upper bound on scroll events fired in reaction to one dispatch.
const MAX_SCROLL_CASCADE: usize = 8;

/// Simulated page environment.
#[derive(Clone)]
pub struct SimHost {
    /// The document
    pub page: Rc<SimPage>,
    /// Listener registry
    pub events: Rc<SimEvents>,
    /// Virtual clock
    pub clock: Rc<SimClock>,
    /// Preference storage
    pub storage: Rc<dyn Storage>,
}

impl SimHost {
    /// Builds a host for `layout` with empty in-memory storage.
    #[must_use]
    pub fn new(layout: &PageLayout) -> Self {
        Self::with_storage(layout, Rc::new(MemoryStorage::new()))
    }

    /// Builds a host for `layout` on top of existing storage.
    #[must_use]
    pub fn with_storage(layout: &PageLayout, storage: Rc<dyn Storage>) -> Self {
        Self {
            page: Rc::new(SimPage::from_layout(layout)),
            events: Rc::new(SimEvents::new()),
            clock: Rc::new(SimClock::new()),
            storage,
        }
    }

    /// The trait-object view handed to controllers.
    #[must_use]
    pub fn host(&self) -> Host {
        let page: Rc<dyn Page> = self.page.clone();
        Host::new(
            page,
            self.events.clone(),
            self.clock.clone(),
            Rc::clone(&self.storage),
        )
    }

    /// Dispatches an event, then fires `scroll` if a handler moved the window.
    ///
    /// Returns the event so callers can inspect `default_prevented`.
    pub fn dispatch(&self, target: EventTarget, kind: EventKind, event: Event) -> Event {
        self.events.dispatch(target, kind, &event);
        self.flush_scroll();
        event
    }

    /// Scrolls the window and fires `scroll` when the position changed.
    pub fn scroll_to(&self, y: f64) {
        self.page.scroll_to(y, ScrollBehavior::Instant);
        self.flush_scroll();
    }

    /// First element matching `selector`, or an error naming it.
    pub fn node(&self, selector: &str) -> Result<NodeId> {
        self.page
            .select_first(selector)
            .context(format!("No element matches '{}'", selector))
    }

    /// Clicks the first element matching `selector`.
    pub fn click(&self, selector: &str) -> Result<Event> {
        let node = self.node(selector)?;
        Ok(self.dispatch(EventTarget::Node(node), EventKind::Click, Event::plain()))
    }

    /// Fires the document-loaded event.
    pub fn load(&self) {
        self.dispatch(EventTarget::Window, EventKind::Load, Event::plain());
    }

    fn flush_scroll(&self) {
        for _ in 0..MAX_SCROLL_CASCADE {
            if !self.page.take_scroll_changed() {
                return;
            }
            self.events
                .dispatch(EventTarget::Window, EventKind::Scroll, &Event::plain());
        }
        tracing::warn!(
            "Scroll handlers kept moving the window; stopped after {} rounds",
            MAX_SCROLL_CASCADE
        );
    }
}
