//! Photo script adapter.
//!
//! Runs `<command> <tag>` in the background.  The loop never waits for the
//! camera; finished children are reaped on the next capture, and the ones
//! still running at drop are waited for.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use log::{debug, warn};

use crate::app::events::PhotoTag;
use crate::app::ports::CameraPort;
use crate::error::{Error, Result};

pub struct ScriptCamera {
    command: PathBuf,
    children: Vec<Child>,
}

impl ScriptCamera {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            children: Vec::new(),
        }
    }

    pub fn try_capture(&mut self, tag: PhotoTag) -> Result<()> {
        self.reap();
        let child = Command::new(&self.command)
            .arg(tag.as_str())
            .stdin(Stdio::null())
            .spawn()
            .map_err(Error::Photo)?;
        debug!("Camera: started pid {} ({})", child.id(), tag);
        self.children.push(child);
        Ok(())
    }

    /// Photo processes that have not been reaped yet.
    pub fn pending(&mut self) -> usize {
        self.reap();
        self.children.len()
    }

    fn reap(&mut self) {
        self.children.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                if !status.success() {
                    warn!("Camera: photo script exited with {}", status);
                }
                false
            }
            Ok(None) => true,
            Err(e) => {
                warn!("Camera: cannot poll pid {}: {}", child.id(), e);
                false
            }
        });
    }
}

impl Drop for ScriptCamera {
    fn drop(&mut self) {
        for mut child in self.children.drain(..) {
            debug!("Camera: waiting for pid {}", child.id());
            if let Err(e) = child.wait() {
                warn!("Camera: cannot wait for pid {}: {}", child.id(), e);
            }
        }
    }
}

impl CameraPort for ScriptCamera {
    fn capture(&mut self, tag: PhotoTag) {
        if let Err(e) = self.try_capture(tag) {
            warn!("Camera: '{}' photo not taken: {}", tag, e);
        }
    }
}
