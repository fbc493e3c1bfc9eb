//! Deferred image loading.
//!
//! Images declare their real source in `data-src`; once any part of the image
//! enters the viewport the source is copied to `src`, the image gets class
//! `loaded` and is no longer watched.

use std::rc::Rc;

use crate::host::{NodeId, Page};

/// Selector of images waiting for their source.
pub const LAZY_IMAGE_SELECTOR: &str = "img[data-src]";

/// Class added once an image has been given its source.
pub const LOADED_CLASS: &str = "loaded";

/// Watches `img[data-src]` elements.
pub struct LazyImages {
    page: Rc<dyn Page>,
    watched: Vec<NodeId>,
}

impl LazyImages {
    /// Starts watching every lazy image currently on the page.
    pub fn new(page: Rc<dyn Page>) -> Self {
        let watched = page.select_all(LAZY_IMAGE_SELECTOR);
        tracing::debug!("Watching {} lazy image(s)", watched.len());
        Self { page, watched }
    }

    /// Loads every watched image intersecting the viewport.
    ///
    /// Returns the number of images loaded by this call.
    pub fn load_visible(&mut self) -> usize {
        let page = Rc::clone(&self.page);
        let viewport_height = page.viewport_height();
        let before = self.watched.len();

        self.watched.retain(|&img| {
            let visible = page
                .bounding_box(img)
                .is_some_and(|rect| rect.intersects_viewport(viewport_height));
            if !visible {
                return true;
            }
            if let Some(src) = page.attribute(img, "data-src") {
                page.set_attribute(img, "src", &src);
            }
            page.add_class(img, LOADED_CLASS);
            false
        });

        before - self.watched.len()
    }

    /// Number of images still waiting.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.watched.len()
    }
}
