//! "Take N photos after the bird has passed" policy.
//!
//! Arming loads the attempt counter; every tick the scheduler is advanced
//! by the tick's real interval and reports when a photo is due.  Re-arming
//! before the previous schedule drained simply overwrites it.
//!
//! ```text
//!   arm() ──▶ remaining = N, wait = 0
//!                │
//!   advance(dt)  ▼
//!   wait >= interval ? ──yes──▶ Capture { last: remaining == 0 }
//!        │no                     remaining -= 1, wait = 0
//!        ▼
//!   wait += dt  (only while still armed)
//! ```

use crate::timing::{DurationCounters, DurationKind};

/// Outcome of one scheduler advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoStep {
    /// Nothing scheduled.
    Idle,
    /// Armed, interval not yet elapsed.
    Waiting,
    /// A photo is due now.  `last` is set on the final attempt, after which
    /// the illumination must be switched off.
    Capture { last: bool },
}

#[derive(Debug, Clone)]
pub struct PhotoScheduler {
    attempts: u8,
    interval_ms: u32,
    remaining: u8,
}

impl PhotoScheduler {
    pub fn new(attempts: u8, interval_ms: u32) -> Self {
        Self {
            attempts,
            interval_ms,
            remaining: 0,
        }
    }

    /// Load a fresh schedule, discarding whatever was left of the last one.
    /// The caller resets the wait counter together with this.
    pub fn arm(&mut self) {
        self.remaining = self.attempts;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    /// Advance by one tick of `step_ms` milliseconds.
    pub fn advance(&mut self, counters: &mut DurationCounters, step_ms: u32) -> PhotoStep {
        if self.remaining == 0 {
            return PhotoStep::Idle;
        }

        let mut step = PhotoStep::Waiting;
        if counters.has_reached(DurationKind::WaitNextPhoto, self.interval_ms) {
            self.remaining -= 1;
            counters.reset(DurationKind::WaitNextPhoto);
            step = PhotoStep::Capture {
                last: self.remaining == 0,
            };
        }

        if self.remaining > 0 {
            counters.increment(DurationKind::WaitNextPhoto, step_ms);
        }
        step
    }
}
