//! PiFace Digital pin assignments for the nest box.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  PiFace pins are numbered 1..=8 on both the
//! output (port A) and input (port B) side.

// ---------------------------------------------------------------------------
// Outputs (MCP23S17 port A, open-collector)
// ---------------------------------------------------------------------------

/// Powers the infrared emitter of the light barrier.
pub const OPIN_IR_SENSOR: u8 = 7;
/// LED illumination used for photos.
pub const OPIN_LIGHT: u8 = 8;

// ---------------------------------------------------------------------------
// Inputs (MCP23S17 port B, pulled up, closed contact reads 0)
// ---------------------------------------------------------------------------

/// Manual quit button (switch S4 on the board).
pub const IPIN_QUIT: u8 = 4;
/// Light barrier inside the entrance hole.
pub const IPIN_INNER_SENSOR: u8 = 1;
/// Light barrier outside the entrance hole.  Wired but not evaluated.
pub const IPIN_OUTER_SENSOR: u8 = 2;

/// Bit of a port register that corresponds to `pin` (1-based).
pub const fn pin_bit_mask(pin: u8) -> u8 {
    1 << (pin - 1)
}
