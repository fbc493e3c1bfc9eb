//! Host boundary: everything the controllers need from the page environment.
//!
//! The controllers never touch a DOM directly. They look elements up, read
//! geometry, flip classes and schedule callbacks through the traits in this
//! module, which lets the same code run against a real browser
//! (`browser` feature) or against the in-memory [`sim`] host in tests.
//!
//! Lookups of absent elements return `None` and mutations of absent elements
//! are silent no-ops; callers treat absence as "nothing to do".

#[cfg(any(feature = "browser", test))]
pub mod node_table;
pub mod selector;
pub mod sim;
pub mod storage;

#[cfg(feature = "browser")]
pub mod browser;

use anyhow::Result;
use std::cell::Cell;
use std::rc::Rc;

use crate::models::{Point, Rect};

pub use selector::Selector;
pub use storage::{FileStorage, MemoryStorage};

/// Opaque handle to an element of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Handle of a scheduled timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Scroll animation requested from [`Page::scroll_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Jump immediately
    Instant,
    /// Let the host animate the scroll
    Smooth,
}

/// Read/write access to the document.
pub trait Page {
    /// Element with the given `id` attribute.
    fn by_id(&self, id: &str) -> Option<NodeId>;

    /// All elements matching `selector`, in document order.
    ///
    /// Unsupported or malformed selectors match nothing.
    fn select_all(&self, selector: &str) -> Vec<NodeId>;

    /// Descendants of `root` matching `selector`, in document order.
    fn select_within(&self, root: NodeId, selector: &str) -> Vec<NodeId>;

    /// The `<body>` element.
    fn body(&self) -> Option<NodeId>;

    /// Element box relative to the viewport.
    fn bounding_box(&self, node: NodeId) -> Option<Rect>;

    /// Distance from the top of the document to the element's top edge.
    fn offset_top(&self, node: NodeId) -> Option<f64>;

    /// Attribute value.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Sets an attribute.
    fn set_attribute(&self, node: NodeId, name: &str, value: &str);

    /// Whether the class list contains `class`.
    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Adds a class (idempotent).
    fn add_class(&self, node: NodeId, class: &str);

    /// Removes a class (idempotent).
    fn remove_class(&self, node: NodeId, class: &str);

    /// Inline style property value.
    fn style(&self, node: NodeId, property: &str) -> Option<String>;

    /// Sets an inline style property.
    fn set_style(&self, node: NodeId, property: &str, value: &str);

    /// Text content.
    fn text(&self, node: NodeId) -> Option<String>;

    /// Replaces the text content.
    fn set_text(&self, node: NodeId, text: &str);

    /// Current value of a form control.
    fn value(&self, node: NodeId) -> Option<String>;

    /// Creates a detached element.
    fn create_element(&self, tag: &str) -> Option<NodeId>;

    /// Inserts `node` as the first child of `<body>`.
    fn prepend_to_body(&self, node: NodeId);

    /// Inner height of the viewport.
    fn viewport_height(&self) -> f64;

    /// Current vertical scroll position of the window.
    fn scroll_y(&self) -> f64;

    /// Scrolls the window.
    fn scroll_to(&self, top: f64, behavior: ScrollBehavior);

    /// Shows a blocking message to the visitor.
    fn alert(&self, message: &str);

    /// Starts a download of `href`, saved as `file_name`.
    fn download(&self, href: &str, file_name: &str);

    /// Opens the print dialog.
    fn print(&self);

    /// Adds or removes `class` depending on `on`.
    fn set_class(&self, node: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    /// First element matching `selector`.
    fn select_first(&self, selector: &str) -> Option<NodeId> {
        self.select_all(selector).into_iter().next()
    }
}

/// Event types the controllers subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Window scrolled
    Scroll,
    /// Document finished parsing
    Load,
    /// Primary click
    Click,
    /// Pointer entered the target
    PointerEnter,
    /// Pointer moved over the target
    PointerMove,
    /// Pointer left the target
    PointerLeave,
    /// Mouse button pressed
    PointerDown,
    /// Key pressed
    KeyDown,
    /// Target gained focus
    Focus,
    /// Target lost focus
    Blur,
    /// Form submitted
    Submit,
}

impl EventKind {
    /// DOM event name.
    #[must_use]
    pub const fn dom_name(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Load => "DOMContentLoaded",
            Self::Click => "click",
            Self::PointerEnter => "mouseenter",
            Self::PointerMove => "mousemove",
            Self::PointerLeave => "mouseleave",
            Self::PointerDown => "mousedown",
            Self::KeyDown => "keydown",
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::Submit => "submit",
        }
    }
}

/// What a listener is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// The window (scroll, load)
    Window,
    /// The document (global pointer and keyboard events)
    Document,
    /// A single element
    Node(NodeId),
}

/// A dispatched event.
#[derive(Debug, Clone, Default)]
pub struct Event {
    /// Pointer position in client coordinates, for pointer events
    pub pointer: Option<Point>,
    /// Key name, for keyboard events
    pub key: Option<String>,
    default_prevented: Cell<bool>,
}

impl Event {
    /// An event without payload.
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    /// A pointer event at `(x, y)`.
    #[must_use]
    pub fn pointer(x: f64, y: f64) -> Self {
        Self {
            pointer: Some(Point::new(x, y)),
            ..Self::default()
        }
    }

    /// A keyboard event.
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Suppresses the host's default action for this event.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Whether a handler called [`Event::prevent_default`].
    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Boxed event handler.
pub type Handler = Box<dyn FnMut(&Event)>;

/// Listener registration.
///
/// Handlers for the same target and kind fire in registration order.
pub trait EventSource {
    /// Subscribes `handler` to `kind` events on `target`.
    fn listen(&self, target: EventTarget, kind: EventKind, handler: Handler);
}

/// Timers and animation frames.
pub trait Scheduler {
    /// Monotonic time in milliseconds.
    fn now(&self) -> f64;

    /// Runs `callback` once after `delay_ms`.
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId;

    /// Cancels a pending timeout; unknown or fired ids are ignored.
    fn clear_timeout(&self, id: TimerId);

    /// Runs `callback` before the next repaint.
    fn request_frame(&self, callback: Box<dyn FnOnce()>);
}

/// Durable key-value storage.
pub trait Storage {
    /// Stored value.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores a value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes a key; deleting a missing key succeeds.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Everything a mounted page needs, bundled.
#[derive(Clone)]
pub struct Host {
    /// Document access
    pub page: Rc<dyn Page>,
    /// Listener registration
    pub events: Rc<dyn EventSource>,
    /// Timers and frames
    pub scheduler: Rc<dyn Scheduler>,
    /// Preference storage
    pub storage: Rc<dyn Storage>,
}

impl Host {
    /// Bundles the four host services.
    pub fn new(
        page: Rc<dyn Page>,
        events: Rc<dyn EventSource>,
        scheduler: Rc<dyn Scheduler>,
        storage: Rc<dyn Storage>,
    ) -> Self {
        Self {
            page,
            events,
            scheduler,
            storage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prevent_default_is_sticky() {
        let event = Event::plain();
        assert!(!event.default_prevented());
        event.prevent_default();
        event.prevent_default();
        assert!(event.default_prevented());
    }

    #[test]
    fn test_event_constructors() {
        assert_eq!(Event::pointer(3.0, 4.0).pointer, Some(Point::new(3.0, 4.0)));
        assert_eq!(Event::key("Tab").key.as_deref(), Some("Tab"));
        assert!(Event::plain().pointer.is_none());
    }

    #[test]
    fn test_dom_names() {
        assert_eq!(EventKind::Load.dom_name(), "DOMContentLoaded");
        assert_eq!(EventKind::PointerLeave.dom_name(), "mouseleave");
    }
}
