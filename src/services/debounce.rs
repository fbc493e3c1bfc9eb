//! Call-rate limiting for scroll handlers.
//!
//! A [`Debouncer`] wraps a callback so that a burst of rapid calls collapses
//! into a single execution:
//!
//! - **leading** (the default): the first call of a burst runs immediately;
//!   later calls are swallowed until `wait_ms` passes without any call.
//! - **trailing** (`leading = false`): the callback runs once, `wait_ms` after
//!   the last call of the burst, with that call's arguments.
//!
//! Every call replaces the single pending timer. There is no way to cancel a
//! debouncer from outside; dropping it turns a pending trailing call into a no-op.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::host::{Scheduler, TimerId};

struct DebounceState<A> {
    scheduler: Rc<dyn Scheduler>,
    wait_ms: u32,
    leading: bool,
    pending: Cell<Option<TimerId>>,
    last_args: RefCell<Option<A>>,
    func: RefCell<Box<dyn FnMut(A)>>,
}

/// A debounced callback taking arguments of type `A`.
pub struct Debouncer<A: 'static> {
    state: Rc<DebounceState<A>>,
}

impl<A: 'static> Debouncer<A> {
    /// Wraps `func`.
    pub fn new(
        scheduler: Rc<dyn Scheduler>,
        wait_ms: u32,
        leading: bool,
        func: impl FnMut(A) + 'static,
    ) -> Self {
        Self {
            state: Rc::new(DebounceState {
                scheduler,
                wait_ms,
                leading,
                pending: Cell::new(None),
                last_args: RefCell::new(None),
                func: RefCell::new(Box::new(func)),
            }),
        }
    }

    /// Leading-edge debouncer with the given quiet period.
    pub fn leading(
        scheduler: Rc<dyn Scheduler>,
        wait_ms: u32,
        func: impl FnMut(A) + 'static,
    ) -> Self {
        Self::new(scheduler, wait_ms, true, func)
    }

    /// Invokes the wrapped callback subject to debouncing.
    pub fn call(&self, args: A) {
        let state = &self.state;
        let call_now = state.leading && state.pending.get().is_none();

        if let Some(timer) = state.pending.take() {
            state.scheduler.clear_timeout(timer);
        }

        let weak: Weak<DebounceState<A>> = Rc::downgrade(&self.state);
        let timer = state.scheduler.set_timeout(
            state.wait_ms,
            Box::new(move || {
                if let Some(state) = weak.upgrade() {
                    state.pending.set(None);
                    if !state.leading {
                        let args = state.last_args.borrow_mut().take();
                        if let Some(args) = args {
                            (state.func.borrow_mut())(args);
                        }
                    }
                }
            }),
        );
        state.pending.set(Some(timer));

        if call_now {
            (state.func.borrow_mut())(args);
        } else if !state.leading {
            *state.last_args.borrow_mut() = Some(args);
        }
    }

    /// Whether a quiet-period timer is running.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.pending.get().is_some()
    }

    /// Quiet period in milliseconds.
    #[must_use]
    pub fn wait_ms(&self) -> u32 {
        self.state.wait_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::sim::SimClock;

    fn recorder() -> (Rc<RefCell<Vec<(u64, u32)>>>, Rc<SimClock>) {
        (Rc::new(RefCell::new(Vec::new())), Rc::new(SimClock::new()))
    }

    #[test]
    fn test_leading_burst_runs_once_immediately() {
        let (calls, clock) = recorder();
        let log = Rc::clone(&calls);
        let time = Rc::clone(&clock);
        let debounced = Debouncer::leading(clock.clone(), 10, move |n: u32| {
            log.borrow_mut().push((time.elapsed_ms(), n));
        });

        debounced.call(1); // t = 0
        clock.advance(5);
        debounced.call(2); // t = 5
        clock.advance(3);
        debounced.call(3); // t = 8

        assert_eq!(*calls.borrow(), vec![(0, 1)]);

        // Quiet period ends at t = 18; nothing more runs before it.
        clock.advance(9);
        assert_eq!(clock.elapsed_ms(), 17);
        assert!(debounced.is_pending());
        assert_eq!(calls.borrow().len(), 1);

        clock.advance(1);
        assert!(!debounced.is_pending());
        assert_eq!(calls.borrow().len(), 1);

        // A new burst after the quiet period fires immediately again.
        debounced.call(4);
        assert_eq!(*calls.borrow(), vec![(0, 1), (18, 4)]);
    }

    #[test]
    fn test_trailing_runs_once_with_last_args() {
        let (calls, clock) = recorder();
        let log = Rc::clone(&calls);
        let time = Rc::clone(&clock);
        let debounced = Debouncer::new(clock.clone(), 10, false, move |n: u32| {
            log.borrow_mut().push((time.elapsed_ms(), n));
        });

        debounced.call(1);
        clock.advance(5);
        debounced.call(2);
        clock.advance(3);
        debounced.call(3);

        clock.advance(9);
        assert!(calls.borrow().is_empty());

        clock.advance(1);
        assert_eq!(*calls.borrow(), vec![(18, 3)]);

        clock.advance(100);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_spaced_calls_each_run() {
        let (calls, clock) = recorder();
        let log = Rc::clone(&calls);
        let debounced = Debouncer::leading(clock.clone(), 10, move |n: u32| {
            log.borrow_mut().push((0, n));
        });

        debounced.call(1);
        clock.advance(10);
        debounced.call(2);
        clock.advance(10);
        debounced.call(3);

        assert_eq!(calls.borrow().len(), 3);
        assert_eq!(debounced.wait_ms(), 10);
    }

    #[test]
    fn test_dropped_debouncer_skips_trailing_call() {
        let (calls, clock) = recorder();
        let log = Rc::clone(&calls);
        let debounced = Debouncer::new(clock.clone(), 10, false, move |n: u32| {
            log.borrow_mut().push((0, n));
        });

        debounced.call(7);
        drop(debounced);
        clock.advance(20);
        assert!(calls.borrow().is_empty());
    }
}
