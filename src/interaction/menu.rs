//! Mobile navigation menu.
//!
//! `#menuToggle` opens and closes `#navMenu`; any `.nav-link` click closes it.
//! The menu's `active` class, the toggle's `aria-expanded` attribute and the
//! three `.hamburger` bars are always rendered from [`MenuState`].

use std::cell::Cell;
use std::rc::Rc;

use crate::constants::ACTIVE_CLASS;
use crate::host::{EventKind, EventTarget, Host, NodeId, Page};

/// Open/closed state of the mobile menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    /// Menu hidden
    #[default]
    Closed,
    /// Menu shown
    Open,
}

impl MenuState {
    /// The other state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }

    /// Whether the menu is open.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// (property, value) per hamburger bar.
const BARS_OPEN: [(&str, &str); 3] = [
    ("transform", "rotate(45deg) translateY(8px)"),
    ("opacity", "0"),
    ("transform", "rotate(-45deg) translateY(-8px)"),
];

const BARS_CLOSED: [(&str, &str); 3] = [
    ("transform", "none"),
    ("opacity", "1"),
    ("transform", "none"),
];

/// Owner of the menu state.
pub struct MenuToggle {
    page: Rc<dyn Page>,
    toggle: Option<NodeId>,
    menu: Option<NodeId>,
    state: Cell<MenuState>,
}

impl MenuToggle {
    /// Looks up `#menuToggle` and `#navMenu`; either may be absent.
    pub fn new(page: Rc<dyn Page>) -> Self {
        Self {
            toggle: page.by_id("menuToggle"),
            menu: page.by_id("navMenu"),
            page,
            state: Cell::new(MenuState::Closed),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> MenuState {
        self.state.get()
    }

    /// Flips the state and re-renders. Returns the new state.
    pub fn toggle(&self) -> MenuState {
        let next = self.state.get().toggled();
        self.set_state(next);
        next
    }

    /// Closes the menu.
    pub fn close(&self) {
        self.set_state(MenuState::Closed);
    }

    fn set_state(&self, state: MenuState) {
        self.state.set(state);
        self.render();
    }

    fn render(&self) {
        let open = self.state.get().is_open();

        if let Some(menu) = self.menu {
            self.page.set_class(menu, ACTIVE_CLASS, open);
        }

        let Some(toggle) = self.toggle else {
            return;
        };
        self.page
            .set_attribute(toggle, "aria-expanded", if open { "true" } else { "false" });

        let styles = if open { &BARS_OPEN } else { &BARS_CLOSED };
        let bars = self.page.select_within(toggle, ".hamburger");
        for (bar, (property, value)) in bars.iter().zip(styles.iter()) {
            self.page.set_style(*bar, property, value);
        }
    }

    /// Registers the toggle and nav-link click handlers.
    pub fn bind(self: &Rc<Self>, host: &Host) {
        if let Some(toggle) = self.toggle {
            let menu = Rc::clone(self);
            host.events.listen(
                EventTarget::Node(toggle),
                EventKind::Click,
                Box::new(move |_| {
                    let state = menu.toggle();
                    tracing::debug!("Menu {:?}", state);
                }),
            );
        }

        for link in host.page.select_all(".nav-link") {
            let menu = Rc::clone(self);
            host.events.listen(
                EventTarget::Node(link),
                EventKind::Click,
                Box::new(move |_| menu.close()),
            );
        }
    }
}
