//! DRM device node wrapper.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::{AsFd, BorrowedFd};
use std::path::{Path, PathBuf};

use drm::control::Device as ControlDevice;
use drm::Device;
use tracing::{debug, info, warn};

use crate::config::DeviceConfig;
use crate::error::{DisplayError, Result};

/// An open `/dev/dri/card*` node.
///
/// Dropping it releases the master lock (if held) and closes the descriptor.
#[derive(Debug)]
pub struct Card {
    file: File,
    path: PathBuf,
    master: bool,
}

impl AsFd for Card {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.file.as_fd()
    }
}

impl Device for Card {}
impl ControlDevice for Card {}

impl Card {
    /// Open a specific device node read/write. std opens with `O_CLOEXEC`.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
            master: false,
        })
    }

    /// Open the first card node that can be opened.
    pub fn open_first(config: &DeviceConfig) -> Result<Self> {
        let mut last_error = io::Error::new(io::ErrorKind::NotFound, "no device paths to try");

        for path in config.candidate_paths() {
            match Self::open(&path) {
                Ok(card) => {
                    info!(path = %path.display(), "Opened DRM device: {}", path.display());
                    return Ok(card);
                }
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "Cannot open DRM device");
                    last_error = e;
                }
            }
        }

        Err(DisplayError::NoDevice(last_error))
    }

    /// Try to become DRM master. Failure is not fatal.
    pub fn become_master(&mut self) -> bool {
        match self.acquire_master_lock() {
            Ok(()) => {
                info!("Successfully became DRM master");
                self.master = true;
            }
            Err(e) => {
                warn!(error = %e, "Failed to become DRM master, continuing anyway");
            }
        }
        self.master
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_master(&self) -> bool {
        self.master
    }
}

impl Drop for Card {
    fn drop(&mut self) {
        if self.master {
            if let Err(e) = self.release_master_lock() {
                debug!(error = %e, "Failed to drop DRM master");
            }
        }
        debug!(path = %self.path.display(), "Closing DRM device");
    }
}
