//! SQLite event log adapter.
//!
//! Writes into the two tables the web front end reads:
//!
//! | Table         | Columns                                   |
//! |---------------|-------------------------------------------|
//! | `tuersensors` | movetype, time, created_at, updated_at    |
//! | `logtexts`    | eventtype, msg, created_at, updated_at    |
//!
//! The database is opened, written and closed for every call so the front
//! end never finds it locked between events.  No busy handler is installed:
//! if the front end holds a lock the write fails at once instead of stalling
//! the tick.  Failures are logged and dropped.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;
use rusqlite::{params, Connection};

use crate::app::events::{Severity, TransitionKind};
use crate::app::ports::EventLogPort;
use crate::error::Result;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS tuersensors (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    movetype INTEGER,
    time DATETIME,
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL
);
CREATE TABLE IF NOT EXISTS logtexts (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    eventtype INTEGER,
    msg VARCHAR(255),
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL
);
";

const INSERT_TRANSITION: &str = "INSERT INTO tuersensors (movetype, time, created_at, updated_at) \
     VALUES (?1, datetime('now','localtime'), datetime('now','localtime'), datetime('now','localtime'))";

const INSERT_TEXT: &str = "INSERT INTO logtexts (eventtype, msg, created_at, updated_at) \
     VALUES (?1, ?2, datetime('now','localtime'), datetime('now','localtime'))";

pub struct SqliteEventLog {
    path: PathBuf,
}

impl SqliteEventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(Duration::ZERO)?;
        Ok(conn)
    }

    /// Create both tables if the database does not have them yet.
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.open()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    pub fn try_record_transition(&self, kind: TransitionKind) -> Result<()> {
        let conn = self.open()?;
        conn.execute(INSERT_TRANSITION, params![kind.code()])?;
        Ok(())
    }

    pub fn try_record_text(&self, severity: Severity, message: &str) -> Result<()> {
        let conn = self.open()?;
        conn.execute(INSERT_TEXT, params![severity.code(), message])?;
        Ok(())
    }
}

impl EventLogPort for SqliteEventLog {
    fn record_transition(&mut self, kind: TransitionKind) {
        if let Err(e) = self.try_record_transition(kind) {
            warn!("Event log: transition {:?} not stored: {}", kind, e);
        }
    }

    fn record_text(&mut self, severity: Severity, message: &str) {
        if let Err(e) = self.try_record_text(severity, message) {
            warn!("Event log: '{}' ({:?}) not stored: {}", message, severity, e);
        }
    }
}
