//! Nest box controller: main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  PiFace          SqliteEventLog   FifoNotifier  ScriptCamera │
//! │  (GpioPort)      (EventLogPort)   (NotifierPort)(CameraPort) │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ───────────────────    │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │           NestboxService (pure logic)                  │  │
//! │  │  detector · health monitor · photo scheduler           │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Takes no arguments.  Exits 0 after the quit button was pressed and
//! non-zero only if the PiFace cannot be initialised.
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::{error, info, warn};
use tracing_subscriber::EnvFilter;

use nestbox::adapters::camera::ScriptCamera;
use nestbox::adapters::fifo::FifoNotifier;
use nestbox::adapters::piface::PiFace;
use nestbox::adapters::sqlite_log::SqliteEventLog;
use nestbox::app::events::{Severity, MSG_INIT_FAILED};
use nestbox::app::ports::{Collaborators, EventLogPort};
use nestbox::app::service::NestboxService;
use nestbox::config::NestboxConfig;

/// Jumper setting of the PiFace board.
const PIFACE_HW_ADDR: u8 = 0;

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    init_logging();

    info!("╔══════════════════════════════════════╗");
    info!("║  Nestbox v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = NestboxConfig::default();
    info!("Config: {}", serde_json::to_string(&config)?);

    // ── 2. Event log ──────────────────────────────────────────
    let mut event_log = SqliteEventLog::new(&config.database_path);
    if let Err(e) = event_log.ensure_schema() {
        warn!("Event log {} unavailable ({}), continuing", event_log.path().display(), e);
    }

    // ── 3. Board ──────────────────────────────────────────────
    let board = match PiFace::open(PIFACE_HW_ADDR) {
        Ok(board) => board,
        Err(e) => {
            error!("PiFace init failed: {}, aborting", e);
            println!("{MSG_INIT_FAILED}");
            event_log.record_text(Severity::Fail, MSG_INIT_FAILED);
            return Err(e).context("hardware initialisation");
        }
    };

    // ── 4. Front end pipe ─────────────────────────────────────
    let notifier = match FifoNotifier::create(&config.pipe_path) {
        Ok(fifo) => Some(fifo),
        Err(e) => {
            warn!("Named pipe {} not available ({}), events will not be sent", config.pipe_path, e);
            None
        }
    };

    let camera = ScriptCamera::new(&config.photo_command);
    let mut io = Collaborators::new(board, event_log, notifier, camera);

    // ── 5. Control loop ───────────────────────────────────────
    println!("Waiting for the birds to come.\nPress Button on PiFace to stop");

    let mut app = NestboxService::new(&config);
    app.run(&mut io, std::thread::sleep);

    // Dropping the collaborators closes the pipe and the SPI device.
    drop(io);
    println!("Bye");
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
