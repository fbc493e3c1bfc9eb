//! Repeating per-frame task.
//!
//! The loop re-requests an animation frame after every tick until its handle
//! is cancelled. In a browser the loop normally lives as long as the page.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::host::Scheduler;

struct LoopState {
    running: Cell<bool>,
    ticks: Cell<u64>,
    tick: RefCell<Box<dyn FnMut()>>,
}

/// Cancellation handle of a running [`FrameLoop`].
#[derive(Clone)]
pub struct FrameLoopHandle {
    state: Rc<LoopState>,
}

impl FrameLoopHandle {
    /// Stops the loop. The already-requested frame becomes a no-op.
    pub fn cancel(&self) {
        self.state.running.set(false);
    }

    /// Whether the loop is still scheduling frames.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    /// Number of ticks executed so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.state.ticks.get()
    }
}

/// Starter for per-frame loops.
pub struct FrameLoop;

impl FrameLoop {
    /// Runs `tick` once per animation frame until the returned handle is cancelled.
    pub fn start(scheduler: Rc<dyn Scheduler>, tick: impl FnMut() + 'static) -> FrameLoopHandle {
        let state = Rc::new(LoopState {
            running: Cell::new(true),
            ticks: Cell::new(0),
            tick: RefCell::new(Box::new(tick)),
        });
        schedule(scheduler, Rc::clone(&state));
        FrameLoopHandle { state }
    }
}

fn schedule(scheduler: Rc<dyn Scheduler>, state: Rc<LoopState>) {
    let next = Rc::clone(&scheduler);
    scheduler.request_frame(Box::new(move || {
        if !state.running.get() {
            return;
        }
        (state.tick.borrow_mut())();
        state.ticks.set(state.ticks.get() + 1);
        schedule(next, state);
    }));
}
