//! Synchronous event dispatch.

use std::cell::RefCell;
use std::rc::Rc;

use crate::host::{Event, EventKind, EventSource, EventTarget, Handler};

struct Listener {
    target: EventTarget,
    kind: EventKind,
    handler: Rc<RefCell<Handler>>,
}

/// [`EventSource`] whose events are dispatched by the caller.
///
/// There is no propagation: an event reaches only the listeners registered on
/// exactly its target, in registration order.
#[derive(Default)]
pub struct SimEvents {
    listeners: RefCell<Vec<Listener>>,
}

impl SimEvents {
    /// No listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `event` to every matching listener. Returns how many ran.
    ///
    /// A listener that is already running (the event was dispatched from
    /// inside its own handler) is skipped.
    pub fn dispatch(&self, target: EventTarget, kind: EventKind, event: &Event) -> usize {
        let handlers: Vec<Rc<RefCell<Handler>>> = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .map(|l| Rc::clone(&l.handler))
            .collect();

        let mut ran = 0;
        for handler in handlers {
            if let Ok(mut handler) = handler.try_borrow_mut() {
                let handler: &mut Handler = &mut handler;
                handler(event);
                ran += 1;
            } else {
                tracing::debug!("Skipping re-entrant {:?} handler", kind);
            }
        }
        ran
    }

    /// Number of listeners for `kind` on `target`.
    #[must_use]
    pub fn listener_count(&self, target: EventTarget, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .count()
    }
}

impl EventSource for SimEvents {
    fn listen(&self, target: EventTarget, kind: EventKind, handler: Handler) {
        self.listeners.borrow_mut().push(Listener {
            target,
            kind,
            handler: Rc::new(RefCell::new(handler)),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NodeId;

    #[test]
    fn test_dispatch_in_registration_order() {
        let events = SimEvents::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for label in ["first", "second"] {
            let log = Rc::clone(&log);
            events.listen(
                EventTarget::Window,
                EventKind::Scroll,
                Box::new(move |_| log.borrow_mut().push(label)),
            );
        }

        assert_eq!(
            events.dispatch(EventTarget::Window, EventKind::Scroll, &Event::plain()),
            2
        );
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_dispatch_only_reaches_exact_target() {
        let events = SimEvents::new();
        events.listen(
            EventTarget::Node(NodeId(1)),
            EventKind::Click,
            Box::new(|event| event.prevent_default()),
        );

        let event = Event::plain();
        assert_eq!(
            events.dispatch(EventTarget::Node(NodeId(2)), EventKind::Click, &event),
            0
        );
        assert!(!event.default_prevented());
        assert_eq!(
            events.dispatch(EventTarget::Node(NodeId(1)), EventKind::Click, &event),
            1
        );
        assert!(event.default_prevented());
        assert_eq!(
            events.listener_count(EventTarget::Node(NodeId(1)), EventKind::Click),
            1
        );
    }
}
