//! Deadline-based debounce driven by the host clock.
//!
//! The widget never sleeps or spawns timers. Hosts report when events happen
//! and poll [`Debounce::fire_if_due`] from their own tick or timer, which keeps
//! time fully under the caller's control in tests.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub const fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    /// Instant at which the pending trigger fires, if one is pending.
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Records a trigger at `now`, pushing any pending deadline out.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns true exactly once after the deadline has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
