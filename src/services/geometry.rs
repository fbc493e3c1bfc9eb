//! Viewport geometry reads.
//!
//! Thin wrapper over [`Page`] that names the two measurements the scroll
//! controllers depend on. Nothing is cached: layout may change between any two
//! events, so every call goes back to the page.

use std::rc::Rc;

use crate::host::{NodeId, Page};
use crate::models::{PageOffset, Rect};

/// Reads element geometry from the page.
#[derive(Clone)]
pub struct ViewportGeometry {
    page: Rc<dyn Page>,
}

impl ViewportGeometry {
    /// Reader over `page`.
    pub fn new(page: Rc<dyn Page>) -> Self {
        Self { page }
    }

    /// Element box relative to the current viewport.
    #[must_use]
    pub fn bounding_box(&self, node: NodeId) -> Option<Rect> {
        self.page.bounding_box(node)
    }

    /// Element offset relative to the whole document.
    #[must_use]
    pub fn page_offset(&self, node: NodeId) -> Option<PageOffset> {
        self.page.offset_top(node).map(|top| PageOffset { top })
    }

    /// Inner height of the viewport.
    #[must_use]
    pub fn viewport_height(&self) -> f64 {
        self.page.viewport_height()
    }

    /// Current vertical scroll position.
    #[must_use]
    pub fn scroll_y(&self) -> f64 {
        self.page.scroll_y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::sim::SimPage;
    use crate::host::ScrollBehavior;
    use crate::models::{ElementSpec, PageLayout};

    #[test]
    fn test_reads_are_never_cached() {
        let layout = PageLayout {
            elements: vec![ElementSpec::new("div")
                .with_id("box")
                .with_rect(Rect::new(1000.0, 0.0, 100.0, 50.0))],
            ..PageLayout::default()
        };
        let page = Rc::new(SimPage::from_layout(&layout));
        let geometry = ViewportGeometry::new(page.clone());
        let node = page.by_id("box").unwrap();

        assert_eq!(geometry.bounding_box(node).unwrap().top, 1000.0);

        page.scroll_to(400.0, ScrollBehavior::Instant);
        assert_eq!(geometry.bounding_box(node).unwrap().top, 600.0);
        assert_eq!(geometry.page_offset(node), Some(PageOffset { top: 1000.0 }));
        assert_eq!(geometry.scroll_y(), 400.0);

        page.set_rect(node, Rect::new(1200.0, 0.0, 100.0, 50.0));
        assert_eq!(geometry.bounding_box(node).unwrap().top, 800.0);
    }

    #[test]
    fn test_absent_node_has_no_geometry() {
        let page = Rc::new(SimPage::from_layout(&PageLayout::default()));
        let geometry = ViewportGeometry::new(page);
        assert!(geometry.bounding_box(NodeId(77)).is_none());
        assert!(geometry.page_offset(NodeId(77)).is_none());
        assert_eq!(geometry.viewport_height(), 800.0);
    }
}
