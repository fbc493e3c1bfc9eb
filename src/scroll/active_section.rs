//! Active navigation link tracking.
//!
//! Every call re-derives all link flags from the current scroll position, so
//! the tracker holds no state between calls and tolerates arbitrary DOM
//! changes in between.

use std::rc::Rc;

use crate::constants::ACTIVE_CLASS;
use crate::host::Page;
use crate::services::ViewportGeometry;

/// Selector of page sections that can become current.
pub const SECTION_SELECTOR: &str = "section[id]";

/// A section's scroll range as seen by the tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRange {
    /// Section id
    pub id: String,
    /// Page offset minus the navbar allowance
    pub top: f64,
    /// `top + height`
    pub bottom: f64,
}

impl SectionRange {
    /// Whether scroll position `y` lies in `(top, bottom]`.
    #[must_use]
    pub fn contains(&self, y: f64) -> bool {
        self.top < y && y <= self.bottom
    }
}

/// Selector of the navigation link pointing at section `id`.
#[must_use]
pub fn nav_link_selector(id: &str) -> String {
    format!(".nav-link[href=\"#{}\"]", id)
}

/// Reflects the current section onto the navigation links.
#[derive(Clone)]
pub struct ActiveSectionTracker {
    page: Rc<dyn Page>,
    geometry: ViewportGeometry,
    navbar_offset: f64,
}

impl ActiveSectionTracker {
    /// Tracker over `page`.
    pub fn new(page: Rc<dyn Page>, navbar_offset: f64) -> Self {
        Self {
            geometry: ViewportGeometry::new(Rc::clone(&page)),
            page,
            navbar_offset,
        }
    }

    /// Scroll ranges of all sections, in document order.
    ///
    /// Sections whose geometry cannot be read are left out.
    #[must_use]
    pub fn section_ranges(&self) -> Vec<SectionRange> {
        self.page
            .select_all(SECTION_SELECTOR)
            .into_iter()
            .filter_map(|node| {
                let id = self.page.attribute(node, "id")?;
                let offset = self.geometry.page_offset(node)?;
                let height = self.geometry.bounding_box(node)?.height;
                let top = offset.top - self.navbar_offset;
                Some(SectionRange {
                    id,
                    top,
                    bottom: top + height,
                })
            })
            .collect()
    }

    /// Sets each section's link `active` iff the section contains the current
    /// scroll position, clearing it otherwise.
    ///
    /// Returns the ids of the current sections. Overlapping ranges can yield
    /// more than one.
    pub fn update_active_link(&self) -> Vec<String> {
        let y = self.geometry.scroll_y();
        let mut current = Vec::new();

        for range in self.section_ranges() {
            let is_current = range.contains(y);
            if let Some(link) = self.page.select_first(&nav_link_selector(&range.id)) {
                self.page.set_class(link, ACTIVE_CLASS, is_current);
            }
            if is_current {
                current.push(range.id);
            }
        }

        current
    }
}
