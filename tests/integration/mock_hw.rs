//! Mock collaborators for integration tests.
//!
//! Every port call is recorded so tests can assert on the full history
//! without a PiFace, a database, a pipe or a camera.

use std::collections::VecDeque;

use nestbox::app::events::{PhotoTag, Severity, TransitionKind};
use nestbox::app::ports::{CameraPort, Collaborators, EventLogPort, GpioPort, NotifierPort, OutputPin};
use nestbox::inputs::{LogicalInput, PinSnapshot};

// ── Snapshot helpers ──────────────────────────────────────────

pub fn idle() -> PinSnapshot {
    PinSnapshot::idle()
}

pub fn blocked() -> PinSnapshot {
    PinSnapshot::idle().with(LogicalInput::InnerSensor, true)
}

pub fn quit() -> PinSnapshot {
    PinSnapshot::idle().with(LogicalInput::Quit, true)
}

// ── GPIO ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioCall {
    Write { pin: OutputPin, on: bool },
    AllOff,
}

/// Plays back a scripted sequence of snapshots; once exhausted the last
/// snapshot is repeated.
pub struct MockGpio {
    script: VecDeque<PinSnapshot>,
    last: PinSnapshot,
    pub calls: Vec<GpioCall>,
}

#[allow(dead_code)]
impl MockGpio {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            last: idle(),
            calls: Vec::new(),
        }
    }

    pub fn push(&mut self, snapshot: PinSnapshot) {
        self.script.push_back(snapshot);
    }

    pub fn push_n(&mut self, snapshot: PinSnapshot, n: usize) {
        for _ in 0..n {
            self.push(snapshot);
        }
    }

    /// How often `pin` was driven to `on`.
    pub fn writes(&self, pin: OutputPin, on: bool) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == GpioCall::Write { pin, on })
            .count()
    }

    /// Current level of `pin` as seen from the call history.
    pub fn is_on(&self, pin: OutputPin) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                GpioCall::Write { pin: p, on } if *p == pin => Some(*on),
                GpioCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl GpioPort for MockGpio {
    fn read_inputs(&mut self) -> PinSnapshot {
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        self.last
    }

    fn write_output(&mut self, pin: OutputPin, on: bool) {
        self.calls.push(GpioCall::Write { pin, on });
    }

    fn all_outputs_off(&mut self) {
        self.calls.push(GpioCall::AllOff);
    }
}

// ── Event log ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockLog {
    pub transitions: Vec<TransitionKind>,
    pub texts: Vec<(Severity, String)>,
}

#[allow(dead_code)]
impl MockLog {
    pub fn count(&self, severity: Severity) -> usize {
        self.texts.iter().filter(|(s, _)| *s == severity).count()
    }
}

impl EventLogPort for MockLog {
    fn record_transition(&mut self, kind: TransitionKind) {
        self.transitions.push(kind);
    }

    fn record_text(&mut self, severity: Severity, message: &str) {
        self.texts.push((severity, message.to_owned()));
    }
}

// ── Notifier ──────────────────────────────────────────────────

#[derive(Default)]
pub struct MockNotifier {
    pub codes: Vec<u16>,
}

impl NotifierPort for MockNotifier {
    fn send(&mut self, code: u16) {
        self.codes.push(code);
    }
}

// ── Camera ────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockCamera {
    pub tags: Vec<PhotoTag>,
}

impl CameraPort for MockCamera {
    fn capture(&mut self, tag: PhotoTag) {
        self.tags.push(tag);
    }
}

// ── Bundle ────────────────────────────────────────────────────

pub type MockIo = Collaborators<MockGpio, MockLog, MockNotifier, MockCamera>;

pub fn mock_io() -> MockIo {
    Collaborators::new(
        MockGpio::new(),
        MockLog::default(),
        MockNotifier::default(),
        MockCamera::default(),
    )
}
