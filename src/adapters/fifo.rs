//! Named-pipe notifier.
//!
//! The front end tails a FIFO and reacts to one decimal event code per line.
//! The pipe is recreated on start and opened read-write, so opening never
//! blocks waiting for a reader and writes never fail with `EPIPE` when the
//! front end is not running.  It is also non-blocking: once the pipe buffer
//! is full because nobody drains it, further events are dropped with a
//! warning.

use core::fmt::Write as _;
use std::fs::{File, OpenOptions};
use std::io::Write as _;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use nix::sys::stat::Mode;
use nix::unistd::mkfifo;

use crate::app::ports::NotifierPort;
use crate::error::{Error, Result};

/// Longest line: "65535\n".
const LINE_CAP: usize = 8;

pub struct FifoNotifier {
    path: PathBuf,
    pipe: File,
}

impl FifoNotifier {
    /// Replace any stale node at `path` with a fresh FIFO and open it.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        // A leftover pipe (or file) from a previous run is simply replaced.
        let _ = std::fs::remove_file(&path);

        mkfifo(path.as_path(), Mode::from_bits_truncate(0o666))
            .map_err(|e| Error::Notify(e.into()))?;
        let pipe = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(nix::libc::O_NONBLOCK)
            .open(&path)
            .map_err(Error::Notify)?;

        debug!("FIFO: {} ready", path.display());
        Ok(Self { path, pipe })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn try_send(&mut self, code: u16) -> Result<()> {
        let mut line: heapless::String<LINE_CAP> = heapless::String::new();
        writeln!(line, "{code}").map_err(|_| Error::Notify(std::io::Error::other("line overflow")))?;
        self.pipe.write_all(line.as_bytes()).map_err(Error::Notify)
    }
}

impl NotifierPort for FifoNotifier {
    fn send(&mut self, code: u16) {
        if let Err(e) = self.try_send(code) {
            warn!("FIFO: event {} not sent: {}", code, e);
        }
    }
}
