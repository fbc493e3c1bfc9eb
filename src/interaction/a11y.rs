//! Keyboard-navigation flag and skip link.

use std::rc::Rc;

use crate::host::{EventKind, EventTarget, Host, NodeId};

/// Body class present while the visitor navigates with the keyboard.
pub const KEYBOARD_NAV_CLASS: &str = "keyboard-navigation";

/// Class of the injected skip link.
pub const SKIP_LINK_CLASS: &str = "skip-link";

const SKIP_LINK_HIDDEN_TOP: &str = "-40px";

const SKIP_LINK_STYLE: [(&str, &str); 8] = [
    ("position", "absolute"),
    ("top", SKIP_LINK_HIDDEN_TOP),
    ("left", "0"),
    ("background", "var(--accent-color)"),
    ("color", "white"),
    ("padding", "8px"),
    ("text-decoration", "none"),
    ("z-index", "10000"),
];

/// `Tab` sets the keyboard-navigation flag; any mouse press clears it.
pub fn bind_keyboard_flag(host: &Host) {
    let page = Rc::clone(&host.page);
    host.events.listen(
        EventTarget::Document,
        EventKind::KeyDown,
        Box::new(move |event| {
            if event.key.as_deref() == Some("Tab") {
                if let Some(body) = page.body() {
                    page.add_class(body, KEYBOARD_NAV_CLASS);
                }
            }
        }),
    );

    let page = Rc::clone(&host.page);
    host.events.listen(
        EventTarget::Document,
        EventKind::PointerDown,
        Box::new(move |_| {
            if let Some(body) = page.body() {
                page.remove_class(body, KEYBOARD_NAV_CLASS);
            }
        }),
    );
}

/// Prepends a "Skip to main content" link to the body.
///
/// The link sits off-screen and slides in while focused.
pub fn install_skip_link(host: &Host) -> Option<NodeId> {
    let page = &host.page;
    let link = page.create_element("a")?;
    page.set_attribute(link, "href", "#home");
    page.add_class(link, SKIP_LINK_CLASS);
    page.set_text(link, "Skip to main content");
    for (property, value) in SKIP_LINK_STYLE {
        page.set_style(link, property, value);
    }

    let focus_page = Rc::clone(page);
    host.events.listen(
        EventTarget::Node(link),
        EventKind::Focus,
        Box::new(move |_| focus_page.set_style(link, "top", "0")),
    );
    let blur_page = Rc::clone(page);
    host.events.listen(
        EventTarget::Node(link),
        EventKind::Blur,
        Box::new(move |_| blur_page.set_style(link, "top", SKIP_LINK_HIDDEN_TOP)),
    );

    page.prepend_to_body(link);
    Some(link)
}
