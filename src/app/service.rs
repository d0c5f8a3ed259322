//! Application service: the control loop.
//!
//! [`NestboxService`] owns every piece of loop state: duration counters,
//! the previous input snapshot, the health alarm, the photo schedule and
//! the current poll interval.  Collaborators are lent to it on each call.
//!
//! ```text
//!   GpioPort ──▶ ┌─────────────────────────────┐ ──▶ EventLogPort
//!                │        NestboxService        │ ──▶ NotifierPort
//!   GpioPort ◀── │ detector · health · photos   │ ──▶ CameraPort
//!                └─────────────────────────────┘
//! ```
//!
//! One tick, in order:
//! 1. read the input snapshot
//! 2. handle inner-sensor edges and update the episode counter
//! 3. check the quit button
//! 4. advance the photo schedule by the *currently selected* interval
//! 5. remember the snapshot for the next tick
//!
//! The caller then sleeps for [`NestboxService::poll_interval`].

use std::time::Duration;

use log::{debug, info};

use crate::app::events::{
    PhotoTag, Severity, TransitionKind, MSG_DEINITIALIZED, MSG_INITIALIZED,
    MSG_SENSOR_TOO_LONG, NOTIFY_EXIT, NOTIFY_SENSOR_ENTERED,
};
use crate::app::ports::{CameraPort, Collaborators, EventLogPort, GpioPort, NotifierPort, OutputPin};
use crate::config::NestboxConfig;
use crate::detector::{Edge, TransitionDetector};
use crate::health::HealthMonitor;
use crate::inputs::LogicalInput;
use crate::photo::{PhotoScheduler, PhotoStep};
use crate::timing::{DurationCounters, DurationKind};

// ───────────────────────────────────────────────────────────────
// NestboxService
// ───────────────────────────────────────────────────────────────

pub struct NestboxService {
    normal_interval_ms: u32,
    fast_interval_ms: u32,
    capture_on_block: bool,

    counters: DurationCounters,
    detector: TransitionDetector,
    health: HealthMonitor,
    photos: PhotoScheduler,
    /// Sleep after the current tick.
    poll_interval_ms: u32,
    running: bool,
    tick_count: u64,
}

impl NestboxService {
    pub fn new(config: &NestboxConfig) -> Self {
        Self {
            normal_interval_ms: config.normal_interval_ms,
            fast_interval_ms: config.fast_interval_ms,
            capture_on_block: config.capture_on_block,
            counters: DurationCounters::new(),
            detector: TransitionDetector::new(),
            health: HealthMonitor::new(config.sensor_fault_after_ms),
            photos: PhotoScheduler::new(config.photos_after_event, config.photo_interval_ms),
            poll_interval_ms: config.normal_interval_ms,
            running: true,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put the board into its initial state: everything off except the
    /// infrared emitter.
    pub fn start<G, L, N, C>(&mut self, io: &mut Collaborators<G, L, N, C>)
    where
        G: GpioPort,
        L: EventLogPort,
        N: NotifierPort,
        C: CameraPort,
    {
        io.gpio.all_outputs_off();
        io.gpio.write_output(OutputPin::IrSensor, true);
        io.log.record_text(Severity::Info, MSG_INITIALIZED);
        info!(
            "NestboxService started (poll {} ms / {} ms)",
            self.normal_interval_ms, self.fast_interval_ms
        );
    }

    /// Tick until the quit button is pressed, sleeping between ticks, then
    /// shut the board down.
    pub fn run<G, L, N, C>(
        &mut self,
        io: &mut Collaborators<G, L, N, C>,
        mut sleep: impl FnMut(Duration),
    ) where
        G: GpioPort,
        L: EventLogPort,
        N: NotifierPort,
        C: CameraPort,
    {
        self.start(io);
        while self.running {
            let interval = self.tick(io);
            sleep(interval);
        }
        self.shutdown(io);
    }

    /// Switch off the barrier, tell the front end we are gone and leave
    /// every output low.
    pub fn shutdown<G, L, N, C>(&mut self, io: &mut Collaborators<G, L, N, C>)
    where
        G: GpioPort,
        L: EventLogPort,
        N: NotifierPort,
        C: CameraPort,
    {
        io.gpio.write_output(OutputPin::IrSensor, false);
        io.notifier.send(NOTIFY_EXIT);
        io.gpio.all_outputs_off();
        io.log.record_text(Severity::Info, MSG_DEINITIALIZED);
        info!("NestboxService stopped after {} ticks", self.tick_count);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one pass of the loop and return how long to sleep afterwards.
    pub fn tick<G, L, N, C>(&mut self, io: &mut Collaborators<G, L, N, C>) -> Duration
    where
        G: GpioPort,
        L: EventLogPort,
        N: NotifierPort,
        C: CameraPort,
    {
        self.tick_count += 1;

        // 1. Sample
        let current = io.gpio.read_inputs();

        // 2. Inner sensor
        match self.detector.edge(LogicalInput::InnerSensor, current) {
            Some(Edge::Entered) => self.on_entered(io),
            Some(Edge::Released) => self.on_released(),
            None => {}
        }

        if current.inner_sensor_active() {
            if self
                .health
                .evaluate(self.counters.elapsed(DurationKind::SensorActive))
            {
                io.log.record_text(Severity::Fail, MSG_SENSOR_TOO_LONG);
            }
            self.counters
                .increment(DurationKind::SensorActive, self.fast_interval_ms);
        } else {
            self.counters
                .increment(DurationKind::SensorActive, self.normal_interval_ms);
        }

        // 3. Quit button
        if current.quit_pressed() && self.running {
            info!("Quit button pressed, stopping after this tick");
            self.running = false;
        }

        // 4. Photos
        if let PhotoStep::Capture { last } =
            self.photos.advance(&mut self.counters, self.poll_interval_ms)
        {
            info!("PHOTO | capture ({} left)", self.photos.remaining());
            io.camera.capture(PhotoTag::Entered);
            if last {
                io.gpio.write_output(OutputPin::Light, false);
            }
        }

        // 5. Slide the window
        self.detector.commit(current);

        self.poll_interval()
    }

    // ── Edge handlers ─────────────────────────────────────────

    fn on_entered<G, L, N, C>(&mut self, io: &mut Collaborators<G, L, N, C>)
    where
        G: GpioPort,
        L: EventLogPort,
        N: NotifierPort,
        C: CameraPort,
    {
        info!("SENSOR | entered");
        io.log.record_transition(TransitionKind::SensorInOut);
        io.gpio.write_output(OutputPin::Light, true);
        io.notifier.send(NOTIFY_SENSOR_ENTERED);
        self.poll_interval_ms = self.fast_interval_ms;
        self.counters.reset(DurationKind::SensorActive);
        if self.capture_on_block {
            io.camera.capture(PhotoTag::Sensor);
        }
    }

    fn on_released(&mut self) {
        debug!(
            "SENSOR | released after {} ms",
            self.counters.elapsed(DurationKind::SensorActive)
        );
        self.poll_interval_ms = self.normal_interval_ms;
        self.health.clear();
        self.counters.reset(DurationKind::SensorActive);
        self.counters.reset(DurationKind::WaitNextPhoto);
        self.photos.arm();
    }

    // ── Queries ───────────────────────────────────────────────

    /// Interval the caller must sleep after the last tick.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.poll_interval_ms))
    }

    /// `false` once the quit button has been seen.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Total ticks executed since construction.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn elapsed(&self, counter: DurationKind) -> u32 {
        self.counters.elapsed(counter)
    }

    pub fn sensor_alarm_raised(&self) -> bool {
        self.health.is_raised()
    }

    /// Photos still to be taken for the current schedule.
    pub fn photos_remaining(&self) -> u8 {
        self.photos.remaining()
    }
}
