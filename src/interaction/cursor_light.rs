//! Cursor-following light.
//!
//! The pointer position is the target; every animation frame the displayed
//! position moves a fixed fraction of the remaining distance toward it and is
//! written to `#cursorLight` as `left`/`top`. The light shows (class `active`)
//! while the pointer moves and hides (class `inactive`) after an idle period,
//! when the pointer leaves the document, or until it re-enters.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::constants::ACTIVE_CLASS;
use crate::host::{EventKind, EventTarget, Host, NodeId, Page, Scheduler, TimerId};
use crate::models::Point;
use crate::services::{FrameLoop, FrameLoopHandle};

/// Class of a hidden light.
pub const INACTIVE_CLASS: &str = "inactive";

/// Position and visibility of the light.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorLightState {
    /// Last pointer position
    pub target: Point,
    /// Smoothed position currently drawn
    pub display: Point,
    /// Pointer moved within the idle period
    pub moving: bool,
    /// Light shown
    pub visible: bool,
}

impl CursorLightState {
    /// Advances the displayed position one frame toward the target.
    pub fn step(&mut self, ease: f64) -> Point {
        self.display = self.display.lerp_toward(self.target, ease);
        self.display
    }
}

/// The cursor light controller.
pub struct CursorLight {
    page: Rc<dyn Page>,
    scheduler: Rc<dyn Scheduler>,
    node: Option<NodeId>,
    ease: f64,
    idle_ms: u32,
    state: RefCell<CursorLightState>,
    idle_timer: Cell<Option<TimerId>>,
}

impl CursorLight {
    /// Controller for `#cursorLight`; the light may be absent.
    pub fn new(host: &Host, ease: f64, idle_ms: u32) -> Rc<Self> {
        Rc::new(Self {
            node: host.page.by_id("cursorLight"),
            page: Rc::clone(&host.page),
            scheduler: Rc::clone(&host.scheduler),
            ease,
            idle_ms,
            state: RefCell::new(CursorLightState::default()),
            idle_timer: Cell::new(None),
        })
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> CursorLightState {
        *self.state.borrow()
    }

    /// Records a pointer move: new target, light shown, idle timer restarted.
    pub fn pointer_moved(self: &Rc<Self>, position: Point) {
        let was_moving = {
            let mut state = self.state.borrow_mut();
            state.target = position;
            std::mem::replace(&mut state.moving, true)
        };
        if !was_moving {
            self.show();
        }

        if let Some(timer) = self.idle_timer.take() {
            self.scheduler.clear_timeout(timer);
        }
        let weak: Weak<Self> = Rc::downgrade(self);
        let timer = self.scheduler.set_timeout(
            self.idle_ms,
            Box::new(move || {
                if let Some(light) = weak.upgrade() {
                    light.idle_timer.set(None);
                    light.hide();
                    light.state.borrow_mut().moving = false;
                }
            }),
        );
        self.idle_timer.set(Some(timer));
    }

    /// Shows the light.
    pub fn show(&self) {
        self.state.borrow_mut().visible = true;
        if let Some(node) = self.node {
            self.page.add_class(node, ACTIVE_CLASS);
            self.page.remove_class(node, INACTIVE_CLASS);
        }
    }

    /// Hides the light.
    pub fn hide(&self) {
        self.state.borrow_mut().visible = false;
        if let Some(node) = self.node {
            self.page.remove_class(node, ACTIVE_CLASS);
            self.page.add_class(node, INACTIVE_CLASS);
        }
    }

    /// One animation frame: ease toward the target and draw.
    pub fn frame(&self) {
        let display = self.state.borrow_mut().step(self.ease);
        if let Some(node) = self.node {
            self.page.set_style(node, "left", &format!("{}px", display.x));
            self.page.set_style(node, "top", &format!("{}px", display.y));
        }
    }

    /// Starts the per-frame animation.
    pub fn start(self: &Rc<Self>) -> FrameLoopHandle {
        let light = Rc::downgrade(self);
        FrameLoop::start(Rc::clone(&self.scheduler), move || {
            if let Some(light) = light.upgrade() {
                light.frame();
            }
        })
    }

    /// Registers the document-level pointer handlers.
    pub fn bind(self: &Rc<Self>, host: &Host) {
        let light = Rc::clone(self);
        host.events.listen(
            EventTarget::Document,
            EventKind::PointerMove,
            Box::new(move |event| {
                if let Some(pointer) = event.pointer {
                    light.pointer_moved(pointer);
                }
            }),
        );

        let light = Rc::clone(self);
        host.events.listen(
            EventTarget::Document,
            EventKind::PointerLeave,
            Box::new(move |_| light.hide()),
        );

        let light = Rc::clone(self);
        host.events.listen(
            EventTarget::Document,
            EventKind::PointerEnter,
            Box::new(move |_| light.show()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::sim::SimHost;
    use crate::host::Event;
    use crate::models::{ElementSpec, PageLayout};

    fn sim() -> SimHost {
        SimHost::new(&PageLayout {
            elements: vec![ElementSpec::new("div").with_id("cursorLight")],
            ..PageLayout::default()
        })
    }

    #[test]
    fn test_smoothing_sequence() {
        let mut state = CursorLightState {
            target: Point::new(100.0, 0.0),
            ..CursorLightState::default()
        };
        assert!((state.step(0.1).x - 10.0).abs() < 1e-9);
        assert!((state.step(0.1).x - 19.0).abs() < 1e-9);
    }

    #[test]
    fn test_frames_write_position() {
        let sim = sim();
        let light = CursorLight::new(&sim.host(), 0.5, 2000);
        let handle = light.start();
        let node = sim.node("#cursorLight").unwrap();

        light.pointer_moved(Point::new(100.0, 40.0));
        sim.clock.run_frames(2);
        assert_eq!(sim.page.style(node, "left").as_deref(), Some("75px"));
        assert_eq!(sim.page.style(node, "top").as_deref(), Some("30px"));
        assert_eq!(handle.ticks(), 2);

        handle.cancel();
        sim.clock.run_frames(1);
        assert_eq!(sim.page.style(node, "left").as_deref(), Some("75px"));
    }

    #[test]
    fn test_idle_timer_hides_after_last_move() {
        let sim = sim();
        let light = CursorLight::new(&sim.host(), 0.1, 2000);
        light.bind(&sim.host());
        let node = sim.node("#cursorLight").unwrap();

        sim.dispatch(EventTarget::Document, EventKind::PointerMove, Event::pointer(5.0, 5.0));
        assert!(light.state().visible);
        assert!(sim.page.has_class(node, "active"));

        sim.clock.advance(1500);
        sim.dispatch(EventTarget::Document, EventKind::PointerMove, Event::pointer(6.0, 6.0));
        sim.clock.advance(1999);
        assert!(light.state().visible);
        assert_eq!(sim.clock.pending_timers(), 1);

        sim.clock.advance(1);
        let state = light.state();
        assert!(!state.visible);
        assert!(!state.moving);
        assert!(sim.page.has_class(node, "inactive"));
        assert!(!sim.page.has_class(node, "active"));
    }

    #[test]
    fn test_document_leave_and_enter() {
        let sim = sim();
        let light = CursorLight::new(&sim.host(), 0.1, 2000);
        light.bind(&sim.host());

        sim.dispatch(EventTarget::Document, EventKind::PointerMove, Event::pointer(1.0, 1.0));
        sim.dispatch(EventTarget::Document, EventKind::PointerLeave, Event::plain());
        assert!(!light.state().visible);

        sim.dispatch(EventTarget::Document, EventKind::PointerEnter, Event::plain());
        assert!(light.state().visible);
    }

    #[test]
    fn test_missing_light_still_tracks_state() {
        let sim = SimHost::new(&PageLayout::default());
        let light = CursorLight::new(&sim.host(), 0.1, 2000);
        light.pointer_moved(Point::new(100.0, 0.0));
        light.frame();
        assert!(light.state().visible);
        assert!((light.state().display.x - 10.0).abs() < 1e-9);
    }
}
