//! Saturating millisecond duration counters.
//!
//! The control loop measures "how long has X held" by adding the length of
//! each tick to a counter.  Counters stop at [`MAX_DURATION_MS`] instead of
//! wrapping, so a box that runs for months never sees a counter jump back
//! to zero and re-trigger a timeout.

/// Ceiling of every duration counter.
pub const MAX_DURATION_MS: u32 = 0xffff_fff0;

/// Identity of a duration counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DurationKind {
    /// Time the inner light barrier has spent in its current state.
    SensorActive = 0,
    /// Time since the last photo attempt (or since arming).
    WaitNextPhoto = 1,
}

impl DurationKind {
    /// Total number of counters, sizes the backing array.
    pub const COUNT: usize = 2;
}

/// Fixed set of duration counters, indexed by [`DurationKind`].
#[derive(Debug, Clone, Default)]
pub struct DurationCounters {
    msec: [u32; DurationKind::COUNT],
}

impl DurationCounters {
    /// All counters start at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self, counter: DurationKind) {
        self.msec[counter as usize] = 0;
    }

    /// Add `step_ms` unless the counter already sits at the ceiling.
    pub fn increment(&mut self, counter: DurationKind, step_ms: u32) {
        let value = &mut self.msec[counter as usize];
        if *value < MAX_DURATION_MS {
            *value = value.saturating_add(step_ms).min(MAX_DURATION_MS);
        }
    }

    pub fn elapsed(&self, counter: DurationKind) -> u32 {
        self.msec[counter as usize]
    }

    /// True once the counter has accumulated at least `threshold_ms`.
    pub fn has_reached(&self, counter: DurationKind, threshold_ms: u32) -> bool {
        self.elapsed(counter) >= threshold_ms
    }
}
