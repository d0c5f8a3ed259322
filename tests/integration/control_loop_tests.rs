//! Integration tests for the NestboxService → ports pipeline.
//!
//! Snapshots are scripted through the mock GPIO; every effect is read back
//! from the recording mocks.

use std::time::Duration;

use nestbox::app::events::{
    PhotoTag, Severity, TransitionKind, MSG_DEINITIALIZED, MSG_INITIALIZED, MSG_SENSOR_TOO_LONG,
    NOTIFY_EXIT, NOTIFY_SENSOR_ENTERED,
};
use nestbox::app::ports::OutputPin;
use nestbox::app::service::NestboxService;
use nestbox::config::NestboxConfig;
use nestbox::inputs::LogicalInput;
use nestbox::timing::DurationKind;

use crate::mock_hw::{blocked, idle, mock_io, quit, GpioCall, MockIo};

const NORMAL: Duration = Duration::from_millis(200);
const FAST: Duration = Duration::from_millis(100);

fn make_app() -> (NestboxService, MockIo) {
    make_app_with(NestboxConfig::default())
}

fn make_app_with(config: NestboxConfig) -> (NestboxService, MockIo) {
    let mut app = NestboxService::new(&config);
    let mut io = mock_io();
    app.start(&mut io);
    (app, io)
}

fn ticks(app: &mut NestboxService, io: &mut MockIo, n: usize) -> Vec<Duration> {
    (0..n).map(|_| app.tick(io)).collect()
}

// ── Episode handling ──────────────────────────────────────────

#[test]
fn short_block_logs_notifies_and_arms_one_photo() {
    let (mut app, mut io) = make_app();
    io.gpio.push(idle());
    io.gpio.push_n(blocked(), 3);
    io.gpio.push(idle());

    let intervals = ticks(&mut app, &mut io, 5);

    assert_eq!(intervals, vec![NORMAL, FAST, FAST, FAST, NORMAL]);
    assert_eq!(io.log.transitions, vec![TransitionKind::SensorInOut]);
    assert_eq!(io.gpio.writes(OutputPin::Light, true), 1);
    assert!(io.gpio.is_on(OutputPin::Light), "light stays on until the photo");
    assert_eq!(io.notifier.codes, vec![NOTIFY_SENSOR_ENTERED]);
    assert_eq!(app.photos_remaining(), 1);
    assert!(io.camera.tags.is_empty());
}

#[test]
fn photo_fires_ten_seconds_after_release_then_light_off() {
    let (mut app, mut io) = make_app();
    io.gpio.push(idle());
    io.gpio.push_n(blocked(), 3);
    io.gpio.push(idle());
    ticks(&mut app, &mut io, 5);

    // 49 more ticks of 200 ms leave the wait counter just short of 10 s.
    ticks(&mut app, &mut io, 49);
    assert!(io.camera.tags.is_empty());

    ticks(&mut app, &mut io, 1);
    assert_eq!(io.camera.tags, vec![PhotoTag::Entered]);
    assert!(!io.gpio.is_on(OutputPin::Light));
    assert_eq!(app.photos_remaining(), 0);

    ticks(&mut app, &mut io, 200);
    assert_eq!(io.camera.tags.len(), 1, "no capture until re-armed");
}

#[test]
fn several_photos_are_spaced_by_the_interval() {
    let config = NestboxConfig {
        photos_after_event: 3,
        ..NestboxConfig::default()
    };
    let (mut app, mut io) = make_app_with(config);
    io.gpio.push(idle());
    io.gpio.push(blocked());
    io.gpio.push(idle());

    let mut fired_at = Vec::new();
    for tick in 1..=200 {
        let before = io.camera.tags.len();
        app.tick(&mut io);
        if io.camera.tags.len() > before {
            fired_at.push(tick);
        }
    }

    assert_eq!(fired_at, vec![53, 103, 153]);
    assert_eq!(io.gpio.writes(OutputPin::Light, false), 1);
}

#[test]
fn re_entry_before_photo_restarts_schedule() {
    let (mut app, mut io) = make_app();
    io.gpio.push(idle());
    io.gpio.push_n(blocked(), 2);
    io.gpio.push_n(idle(), 10);
    io.gpio.push_n(blocked(), 3);
    io.gpio.push(idle());

    ticks(&mut app, &mut io, 200);

    assert_eq!(io.log.transitions.len(), 2);
    assert_eq!(io.notifier.codes, vec![NOTIFY_SENSOR_ENTERED, NOTIFY_SENSOR_ENTERED]);
    assert_eq!(io.camera.tags, vec![PhotoTag::Entered]);
    assert!(!io.gpio.is_on(OutputPin::Light));
}

#[test]
fn single_noisy_tick_starts_a_new_episode() {
    let (mut app, mut io) = make_app();
    io.gpio.push(blocked());
    io.gpio.push(idle());
    io.gpio.push(blocked());

    ticks(&mut app, &mut io, 3);

    assert_eq!(io.log.transitions.len(), 2);
    assert_eq!(io.notifier.codes.len(), 2);
}

#[test]
fn barrier_blocked_at_startup_counts_as_entry() {
    let (mut app, mut io) = make_app();
    io.gpio.push(blocked());

    let intervals = ticks(&mut app, &mut io, 1);

    assert_eq!(intervals, vec![FAST]);
    assert_eq!(io.log.transitions.len(), 1);
}

#[test]
fn capture_on_block_takes_immediate_sensor_photo() {
    let config = NestboxConfig {
        capture_on_block: true,
        ..NestboxConfig::default()
    };
    let (mut app, mut io) = make_app_with(config);
    io.gpio.push(blocked());

    ticks(&mut app, &mut io, 1);

    assert_eq!(io.camera.tags, vec![PhotoTag::Sensor]);
}

// ── Health monitor ────────────────────────────────────────────

#[test]
fn stuck_sensor_is_reported_exactly_once() {
    let (mut app, mut io) = make_app();
    io.gpio.push(blocked());

    // Entry tick evaluates 0 ms, the 601st active tick evaluates 60 000 ms.
    ticks(&mut app, &mut io, 601);
    assert!(!app.sensor_alarm_raised());
    assert_eq!(io.log.count(Severity::Fail), 0);

    ticks(&mut app, &mut io, 1);
    assert!(app.sensor_alarm_raised());
    assert_eq!(io.log.count(Severity::Fail), 1);

    ticks(&mut app, &mut io, 500);
    assert_eq!(io.log.count(Severity::Fail), 1, "alarm must not repeat");
    assert!(io
        .log
        .texts
        .iter()
        .any(|(s, m)| *s == Severity::Fail && m == MSG_SENSOR_TOO_LONG));

    io.gpio.push(idle());
    ticks(&mut app, &mut io, 1);
    assert!(!app.sensor_alarm_raised(), "release clears the alarm");
    assert_eq!(app.elapsed(DurationKind::SensorActive), 200);
}

#[test]
fn second_stuck_episode_reports_again() {
    let (mut app, mut io) = make_app();
    io.gpio.push_n(blocked(), 700);
    io.gpio.push(idle());
    io.gpio.push_n(blocked(), 700);

    ticks(&mut app, &mut io, 1_401);

    assert_eq!(io.log.count(Severity::Fail), 2);
}

// ── Shutdown ──────────────────────────────────────────────────

#[test]
fn quit_stops_after_current_tick_and_signals_exit() {
    let mut app = NestboxService::new(&NestboxConfig::default());
    let mut io = mock_io();
    io.gpio.push(idle());
    io.gpio.push(idle());
    io.gpio.push(quit());

    let mut sleeps = Vec::new();
    app.run(&mut io, |d| sleeps.push(d));

    assert!(!app.is_running());
    assert_eq!(app.tick_count(), 3);
    assert_eq!(sleeps, vec![NORMAL; 3]);
    assert_eq!(io.notifier.codes, vec![NOTIFY_EXIT]);
    assert_eq!(
        io.gpio.calls,
        vec![
            GpioCall::AllOff,
            GpioCall::Write { pin: OutputPin::IrSensor, on: true },
            GpioCall::Write { pin: OutputPin::IrSensor, on: false },
            GpioCall::AllOff,
        ]
    );
    let infos: Vec<&str> = io
        .log
        .texts
        .iter()
        .filter(|(s, _)| *s == Severity::Info)
        .map(|(_, m)| m.as_str())
        .collect();
    assert_eq!(infos, vec![MSG_INITIALIZED, MSG_DEINITIALIZED]);
}

#[test]
fn quit_tick_still_processes_sensor_entry() {
    let mut app = NestboxService::new(&NestboxConfig::default());
    let mut io = mock_io();
    io.gpio.push(blocked().with(LogicalInput::Quit, true));

    let mut sleeps = Vec::new();
    app.run(&mut io, |d| sleeps.push(d));

    assert_eq!(io.log.transitions.len(), 1);
    assert_eq!(io.notifier.codes, vec![NOTIFY_SENSOR_ENTERED, NOTIFY_EXIT]);
    assert_eq!(sleeps, vec![FAST]);
}
