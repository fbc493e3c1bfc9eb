//! Card hover effects.
//!
//! Skill cards lift while hovered. Project cards tilt toward the pointer:
//! with the pointer at `(x, y)` relative to the card and the card center at
//! `(cx, cy)`, `rotateX = (y - cy) / divisor` and `rotateY = (cx - x) / divisor`.

use std::rc::Rc;

use crate::host::{EventKind, EventTarget, Host, NodeId, Page};
use crate::models::{Point, Rect};

/// Transform applied to a hovered skill card.
pub const SKILL_LIFT: &str = "translateY(-10px) scale(1.02)";

/// Transform restoring a skill card.
pub const SKILL_REST: &str = "translateY(0) scale(1)";

/// Transform restoring a project card.
pub const PROJECT_REST: &str = "perspective(1000px) rotateX(0) rotateY(0) translateY(0)";

/// Rotation of a tilted card, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    /// Rotation around the horizontal axis
    pub rotate_x: f64,
    /// Rotation around the vertical axis
    pub rotate_y: f64,
}

impl Tilt {
    /// CSS transform for this tilt.
    #[must_use]
    pub fn transform(&self) -> String {
        format!(
            "perspective(1000px) rotateX({}deg) rotateY({}deg) translateY(-8px)",
            self.rotate_x, self.rotate_y
        )
    }
}

/// Tilt for a pointer at client position `pointer` over a card at `rect`.
#[must_use]
pub fn tilt(pointer: Point, rect: &Rect, divisor: f64) -> Tilt {
    let x = pointer.x - rect.left;
    let y = pointer.y - rect.top;
    let center_x = rect.width / 2.0;
    let center_y = rect.height / 2.0;
    Tilt {
        rotate_x: (y - center_y) / divisor,
        rotate_y: (center_x - x) / divisor,
    }
}

/// Binds lift handlers on every `.skill-card`.
pub fn bind_skill_cards(host: &Host) -> usize {
    let cards = host.page.select_all(".skill-card");
    for &card in &cards {
        set_transform_on(host, card, EventKind::PointerEnter, SKILL_LIFT);
        set_transform_on(host, card, EventKind::PointerLeave, SKILL_REST);
    }
    cards.len()
}

/// Binds tilt handlers on every `.project-card`.
pub fn bind_project_cards(host: &Host, divisor: f64) -> usize {
    let cards = host.page.select_all(".project-card");
    for &card in &cards {
        for kind in [EventKind::PointerEnter, EventKind::PointerMove] {
            let page = Rc::clone(&host.page);
            host.events.listen(
                EventTarget::Node(card),
                kind,
                Box::new(move |event| {
                    apply_tilt(page.as_ref(), card, event.pointer, divisor);
                }),
            );
        }
        set_transform_on(host, card, EventKind::PointerLeave, PROJECT_REST);
    }
    cards.len()
}

fn apply_tilt(page: &dyn Page, card: NodeId, pointer: Option<Point>, divisor: f64) {
    let (Some(pointer), Some(rect)) = (pointer, page.bounding_box(card)) else {
        return;
    };
    let transform = tilt(pointer, &rect, divisor).transform();
    page.set_style(card, "transform", &transform);
}

fn set_transform_on(host: &Host, card: NodeId, kind: EventKind, transform: &'static str) {
    let page = Rc::clone(&host.page);
    host.events.listen(
        EventTarget::Node(card),
        kind,
        Box::new(move |_| page.set_style(card, "transform", transform)),
    );
}
