//! Sticky header state.

use std::cell::Cell;
use std::rc::Rc;

use crate::host::Page;

/// Class applied to `#navbar` once the page is scrolled past the threshold.
pub const SCROLLED_CLASS: &str = "scrolled";

/// Toggles `#navbar.scrolled` based on the scroll position.
pub struct StickyHeader {
    page: Rc<dyn Page>,
    threshold: f64,
    last_scroll: Cell<f64>,
}

impl StickyHeader {
    /// Header controller with the given threshold in pixels.
    pub fn new(page: Rc<dyn Page>, threshold: f64) -> Self {
        Self {
            page,
            threshold,
            last_scroll: Cell::new(0.0),
        }
    }

    /// Re-derives the `scrolled` flag. Returns the new flag value.
    pub fn update(&self) -> bool {
        let y = self.page.scroll_y();
        let scrolled = y > self.threshold;
        if let Some(navbar) = self.page.by_id("navbar") {
            self.page.set_class(navbar, SCROLLED_CLASS, scrolled);
        }
        self.last_scroll.set(y);
        scrolled
    }

    /// Scroll position seen by the last [`StickyHeader::update`].
    #[must_use]
    pub fn last_scroll(&self) -> f64 {
        self.last_scroll.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::sim::SimPage;
    use crate::host::ScrollBehavior;
    use crate::models::{ElementSpec, PageLayout};

    #[test]
    fn test_threshold() {
        let page = Rc::new(SimPage::from_layout(&PageLayout {
            elements: vec![ElementSpec::new("nav").with_id("navbar").fixed()],
            ..PageLayout::default()
        }));
        let navbar = page.by_id("navbar").unwrap();
        let sticky = StickyHeader::new(page.clone(), 100.0);

        page.scroll_to(100.0, ScrollBehavior::Instant);
        assert!(!sticky.update());
        assert!(!page.has_class(navbar, "scrolled"));

        page.scroll_to(101.0, ScrollBehavior::Instant);
        assert!(sticky.update());
        assert!(page.has_class(navbar, "scrolled"));
        assert_eq!(sticky.last_scroll(), 101.0);

        page.scroll_to(0.0, ScrollBehavior::Instant);
        assert!(!sticky.update());
        assert!(!page.has_class(navbar, "scrolled"));
    }

    #[test]
    fn test_missing_navbar() {
        let page = Rc::new(SimPage::from_layout(&PageLayout::default()));
        let sticky = StickyHeader::new(page.clone(), 100.0);
        page.scroll_to(500.0, ScrollBehavior::Instant);
        assert!(sticky.update());
    }
}
