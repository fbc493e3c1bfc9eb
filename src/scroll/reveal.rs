//! Reveal-on-scroll.
//!
//! Elements tagged `.reveal` start pending and become activated (class
//! `active`) once their top edge rises above `viewport_height - margin`.
//! Activation is one-way: nothing ever moves an element back to pending.

use std::rc::Rc;

use crate::constants::ACTIVE_CLASS;
use crate::host::{NodeId, Page};
use crate::services::ViewportGeometry;

/// Selector of revealable elements.
pub const REVEAL_SELECTOR: &str = ".reveal";

/// Per-element reveal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Waiting to scroll into view
    Pending,
    /// Shown; terminal
    Activated,
}

#[derive(Debug, Clone, Copy)]
struct RevealElement {
    node: NodeId,
    state: RevealState,
}

/// Tracks every `.reveal` element and activates it when it comes into view.
pub struct RevealController {
    page: Rc<dyn Page>,
    geometry: ViewportGeometry,
    activation_margin: f64,
    elements: Vec<RevealElement>,
}

impl RevealController {
    /// Controller registering the page's current `.reveal` elements.
    pub fn new(page: Rc<dyn Page>, activation_margin: f64) -> Self {
        let mut controller = Self {
            geometry: ViewportGeometry::new(Rc::clone(&page)),
            page,
            activation_margin,
            elements: Vec::new(),
        };
        controller.register_new();
        controller
    }

    /// Registers `.reveal` elements that appeared since the last scan.
    ///
    /// Returns the number of newly registered elements.
    pub fn register_new(&mut self) -> usize {
        let before = self.elements.len();
        for node in self.page.select_all(REVEAL_SELECTOR) {
            if !self.elements.iter().any(|el| el.node == node) {
                self.elements.push(RevealElement {
                    node,
                    state: RevealState::Pending,
                });
            }
        }
        self.elements.len() - before
    }

    /// Evaluates every registered element and activates those now in view.
    ///
    /// Returns the number of elements activated by this call.
    pub fn evaluate_all(&mut self) -> usize {
        self.register_new();

        let threshold = self.geometry.viewport_height() - self.activation_margin;
        let mut activated = 0;

        for element in &mut self.elements {
            if element.state == RevealState::Activated {
                continue;
            }
            let Some(rect) = self.geometry.bounding_box(element.node) else {
                continue;
            };
            if rect.top < threshold {
                self.page.add_class(element.node, ACTIVE_CLASS);
                element.state = RevealState::Activated;
                activated += 1;
            }
        }

        if activated > 0 {
            tracing::debug!("Revealed {} element(s)", activated);
        }
        activated
    }

    /// State of `node`, if it is registered.
    #[must_use]
    pub fn state(&self, node: NodeId) -> Option<RevealState> {
        self.elements
            .iter()
            .find(|el| el.node == node)
            .map(|el| el.state)
    }

    /// Number of activated elements.
    #[must_use]
    pub fn activated_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|el| el.state == RevealState::Activated)
            .count()
    }

    /// Number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether no element is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
