//! Virtual clock with timers and animation frames.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::host::{Scheduler, TimerId};

type TimerKey = (u64, u64);

/// Deterministic [`Scheduler`].
///
/// Time only moves when [`SimClock::advance`] is called. Timers due at the
/// same instant fire in the order they were scheduled. Animation frames are
/// independent of time: [`SimClock::run_frame`] runs whatever was requested
/// before it was called, and callbacks requested during a frame wait for the
/// next one.
#[derive(Default)]
pub struct SimClock {
    now: Cell<u64>,
    next_id: Cell<u64>,
    timers: RefCell<BTreeMap<TimerKey, Box<dyn FnOnce()>>>,
    frames: RefCell<Vec<Box<dyn FnOnce()>>>,
    frames_run: Cell<u64>,
}

impl SimClock {
    /// A clock at t = 0 with nothing scheduled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.now.get()
    }

    /// Moves time forward by `ms`, firing every timer that falls due.
    ///
    /// Returns the number of timers fired.
    pub fn advance(&self, ms: u64) -> usize {
        let target = self.now.get() + ms;
        let mut fired = 0;

        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                match timers.keys().next().copied() {
                    Some(key) if key.0 <= target => timers.remove(&key).map(|cb| (key, cb)),
                    _ => None,
                }
            };

            let Some(((due, _), callback)) = next else {
                break;
            };

            self.now.set(due);
            callback();
            fired += 1;
        }

        self.now.set(target);
        fired
    }

    /// Runs one animation frame. Returns the number of callbacks run.
    pub fn run_frame(&self) -> usize {
        let callbacks = std::mem::take(&mut *self.frames.borrow_mut());
        let count = callbacks.len();
        for callback in callbacks {
            callback();
        }
        self.frames_run.set(self.frames_run.get() + 1);
        count
    }

    /// Runs `count` animation frames.
    pub fn run_frames(&self, count: u32) -> usize {
        (0..count).map(|_| self.run_frame()).sum()
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Number of callbacks waiting for the next frame.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Number of frames run so far.
    #[must_use]
    pub fn frames_run(&self) -> u64 {
        self.frames_run.get()
    }
}

impl Scheduler for SimClock {
    fn now(&self) -> f64 {
        self.now.get() as f64
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let due = self.now.get() + u64::from(delay_ms);
        self.timers.borrow_mut().insert((due, id), callback);
        TimerId(id)
    }

    fn clear_timeout(&self, id: TimerId) {
        self.timers.borrow_mut().retain(|(_, timer), _| *timer != id.0);
    }

    fn request_frame(&self, callback: Box<dyn FnOnce()>) {
        self.frames.borrow_mut().push(callback);
    }
}
