//! Raw input snapshots and their logical interpretation.
//!
//! The PiFace input port has pull-ups, and both the quit button and the
//! light barrier pull their line to ground when they are *active*.  A
//! snapshot therefore reads "active" where the corresponding bit is clear.
//!
//! ```text
//!   bit:      7 6 5 4 3 2 1 0
//!   pin:      8 7 6 5 4 3 2 1
//!                     │     └── InnerSensor (0 = blocked/active)
//!                     └──────── Quit        (0 = pressed/active)
//! ```

use crate::pins;

/// Logical inputs evaluated by the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalInput {
    Quit,
    InnerSensor,
}

impl LogicalInput {
    /// Bit of the input port this signal is wired to.
    pub const fn mask(self) -> u8 {
        match self {
            Self::Quit => pins::pin_bit_mask(pins::IPIN_QUIT),
            Self::InnerSensor => pins::pin_bit_mask(pins::IPIN_INNER_SENSOR),
        }
    }
}

/// Electrical state of all eight input pins at one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinSnapshot(u8);

impl PinSnapshot {
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Every line pulled up, i.e. nothing active.
    pub const fn idle() -> Self {
        Self(0xff)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Active-low: the input is active when its bit is clear.
    pub const fn is_active(self, input: LogicalInput) -> bool {
        self.0 & input.mask() == 0
    }

    pub const fn is_inactive(self, input: LogicalInput) -> bool {
        !self.is_active(input)
    }

    pub const fn quit_pressed(self) -> bool {
        self.is_active(LogicalInput::Quit)
    }

    pub const fn inner_sensor_active(self) -> bool {
        self.is_active(LogicalInput::InnerSensor)
    }

    /// Copy of this snapshot with `input` driven to the given logical state.
    #[must_use]
    pub const fn with(self, input: LogicalInput, active: bool) -> Self {
        if active {
            Self(self.0 & !input.mask())
        } else {
            Self(self.0 | input.mask())
        }
    }
}
