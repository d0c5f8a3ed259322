//! Port traits: the hexagonal boundary between the control loop and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ NestboxService (domain)
//! ```
//!
//! Driven adapters (PiFace board, SQLite log, named pipe, photo script)
//! implement these traits.  Apart from reading the inputs, every call is
//! fire-and-forget: methods return `()` and adapters log and drop their
//! own failures, so a broken database or a missing camera never stalls the
//! loop.

use crate::app::events::{PhotoTag, Severity, TransitionKind};
use crate::inputs::PinSnapshot;
use crate::pins;

// ───────────────────────────────────────────────────────────────
// GPIO port (driven adapter: board ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Outputs the control loop switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputPin {
    /// Infrared emitter of the light barrier.
    IrSensor,
    /// Photo illumination.
    Light,
}

impl OutputPin {
    /// PiFace output number (1..=8).
    pub const fn pin(self) -> u8 {
        match self {
            Self::IrSensor => pins::OPIN_IR_SENSOR,
            Self::Light => pins::OPIN_LIGHT,
        }
    }
}

pub trait GpioPort {
    /// Sample all input pins at once.
    fn read_inputs(&mut self) -> PinSnapshot;

    /// Drive a single output.
    fn write_output(&mut self, pin: OutputPin, on: bool);

    /// Drive every output low. Used before start and after stop.
    fn all_outputs_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event log port (driven adapter: domain → persistent store)
// ───────────────────────────────────────────────────────────────

/// Append-only event store read by the web front end.
pub trait EventLogPort {
    fn record_transition(&mut self, kind: TransitionKind);

    fn record_text(&mut self, severity: Severity, message: &str);
}

// ───────────────────────────────────────────────────────────────
// Notification port (driven adapter: domain → front end process)
// ───────────────────────────────────────────────────────────────

pub trait NotifierPort {
    /// Send one event code.  See [`crate::app::events`] for the codes.
    fn send(&mut self, code: u16);
}

// ───────────────────────────────────────────────────────────────
// Camera port (driven adapter: domain → photo script)
// ───────────────────────────────────────────────────────────────

pub trait CameraPort {
    /// Trigger a photo; does not wait for it to be taken.
    fn capture(&mut self, tag: PhotoTag);
}

// ───────────────────────────────────────────────────────────────
// Bundle
// ───────────────────────────────────────────────────────────────

/// The four collaborators, owned by the caller and lent to the service on
/// every call.
pub struct Collaborators<G, L, N, C> {
    pub gpio: G,
    pub log: L,
    pub notifier: N,
    pub camera: C,
}

impl<G, L, N, C> Collaborators<G, L, N, C>
where
    G: GpioPort,
    L: EventLogPort,
    N: NotifierPort,
    C: CameraPort,
{
    pub fn new(gpio: G, log: L, notifier: N, camera: C) -> Self {
        Self {
            gpio,
            log,
            notifier,
            camera,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Optional notifier
// ───────────────────────────────────────────────────────────────

/// `None` stands in for a named pipe that could not be set up.
impl<T: NotifierPort> NotifierPort for Option<T> {
    fn send(&mut self, code: u16) {
        if let Some(inner) = self {
            inner.send(code);
        }
    }
}
