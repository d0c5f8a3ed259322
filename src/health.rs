//! Stuck-sensor supervision.
//!
//! A jammed or dirty light barrier looks like a bird that never leaves.
//! The monitor raises a single alarm once the barrier has been active for
//! longer than the configured limit and stays quiet until the barrier
//! releases again, so one fault produces one log entry.

use log::{error, info};

/// Latched "sensor enabled too long" alarm for the inner light barrier.
#[derive(Debug, Clone)]
pub struct HealthMonitor {
    limit_ms: u32,
    fail_enabled: bool,
}

impl HealthMonitor {
    pub fn new(limit_ms: u32) -> Self {
        Self {
            limit_ms,
            fail_enabled: false,
        }
    }

    /// Evaluate the active duration of the current episode.
    /// Returns `true` only on the tick that raises the alarm.
    pub fn evaluate(&mut self, active_ms: u32) -> bool {
        if active_ms > self.limit_ms && !self.fail_enabled {
            self.fail_enabled = true;
            error!("HEALTH: inner sensor active for {} ms", active_ms);
            return true;
        }
        false
    }

    /// Barrier released: arm the alarm for the next episode.
    pub fn clear(&mut self) {
        if self.fail_enabled {
            info!("HEALTH: inner sensor released, alarm cleared");
        }
        self.fail_enabled = false;
    }

    pub fn is_raised(&self) -> bool {
        self.fail_enabled
    }
}
