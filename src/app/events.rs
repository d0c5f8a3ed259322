//! Codes and tags exchanged with the collaborators.
//!
//! The numeric values are part of the contract with the web front end that
//! reads the database and the named pipe, so they must not change.

/// Kind of row written to the sensor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum TransitionKind {
    /// Something passed the entrance hole (direction unknown).
    SensorInOut = 0,
}

impl TransitionKind {
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Severity column of the text log table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Severity {
    Fail = 100,
    Info = 10_000,
}

impl Severity {
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Pipe code sent when the inner barrier gets blocked.
pub const NOTIFY_SENSOR_ENTERED: u16 = 0;
/// Pipe code sent once the control loop has stopped.
pub const NOTIFY_EXIT: u16 = 0xffff;

/// Context passed to the photo script as its only argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoTag {
    /// Scheduled photo after the bird has fully passed.
    Entered,
    /// Immediate photo the moment the barrier was blocked.
    Sensor,
}

impl PhotoTag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entered => "entered",
            Self::Sensor => "sensor",
        }
    }
}

impl core::fmt::Display for PhotoTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Log texts ─────────────────────────────────────────────────

pub const MSG_SENSOR_TOO_LONG: &str = "Sensor enabled too long. There might be a sensor problem";
pub const MSG_INITIALIZED: &str = "Sensor initialized and waiting";
pub const MSG_DEINITIALIZED: &str = "Sensor deinitialized";
pub const MSG_INIT_FAILED: &str = "Could not initialize piface";
