//! Unified error types for the nest box controller.
//!
//! Only construction of the collaborators can fail in a way the caller sees.
//! Once the loop runs, adapters log and drop their own failures.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible adapter constructor funnels into this type.
#[derive(Debug)]
pub enum Error {
    /// The PiFace board could not be initialised.
    Init(String),
    /// A GPIO transfer failed.
    Gpio(String),
    /// The SQLite event log rejected an operation.
    EventLog(rusqlite::Error),
    /// The named pipe could not be created or written.
    Notify(std::io::Error),
    /// The photo command could not be spawned.
    Photo(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Gpio(msg) => write!(f, "gpio: {msg}"),
            Self::EventLog(e) => write!(f, "event log: {e}"),
            Self::Notify(e) => write!(f, "notify: {e}"),
            Self::Photo(e) => write!(f, "photo: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLog(e) => Some(e),
            Self::Notify(e) | Self::Photo(e) => Some(e),
            Self::Init(_) | Self::Gpio(_) => None,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Self::EventLog(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
