//! Smooth scrolling for in-page anchor links.

use std::rc::Rc;

use crate::host::{EventKind, EventTarget, Host, Page, ScrollBehavior};

/// Selector of in-page links.
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// Scroll position that brings the target of `href` just below the navbar.
///
/// Returns `None` for a bare `#`, for non-fragment hrefs and for missing
/// targets. A missing navbar counts as zero height.
#[must_use]
pub fn anchor_scroll_target(page: &dyn Page, href: &str) -> Option<f64> {
    let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
    let target = page.by_id(id)?;
    let offset = page.offset_top(target)?;
    let navbar_height = page
        .by_id("navbar")
        .and_then(|navbar| page.bounding_box(navbar))
        .map_or(0.0, |rect| rect.height);
    Some(offset - navbar_height)
}

/// Binds the click handler on every anchor present at mount time.
///
/// Returns the number of anchors bound.
pub fn bind(host: &Host) -> usize {
    let anchors = host.page.select_all(ANCHOR_SELECTOR);
    for &anchor in &anchors {
        let page = Rc::clone(&host.page);
        host.events.listen(
            EventTarget::Node(anchor),
            EventKind::Click,
            Box::new(move |event| {
                event.prevent_default();
                let Some(href) = page.attribute(anchor, "href") else {
                    return;
                };
                if let Some(top) = anchor_scroll_target(page.as_ref(), &href) {
                    tracing::debug!("Scrolling to {} at {}", href, top);
                    page.scroll_to(top, ScrollBehavior::Smooth);
                }
            }),
        );
    }
    anchors.len()
}
