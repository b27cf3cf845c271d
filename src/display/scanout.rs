//! Getting finished frames onto the screen.

use std::io;
use std::sync::atomic::{fence, Ordering};

use drm::control::framebuffer;

use super::card::Card;
use super::session::DisplaySession;

/// Something that can show the pixels the loop just rendered.
pub trait Scanout {
    /// Make `pixels` visible. Called once per frame after rendering.
    fn present(&mut self, pixels: &[u8]) -> io::Result<()>;
}

/// Scanout through a KMS CRTC
pub struct DrmScanout<'a> {
    card: &'a Card,
    session: &'a DisplaySession,
    fb: framebuffer::Handle,
}

impl<'a> DrmScanout<'a> {
    pub fn new(card: &'a Card, session: &'a DisplaySession, fb: framebuffer::Handle) -> Self {
        Self { card, session, fb }
    }
}

impl Scanout for DrmScanout<'_> {
    fn present(&mut self, pixels: &[u8]) -> io::Result<()> {
        sync_mapping(pixels)?;
        self.session.present(self.card, self.fb)
    }
}

/// Fence CPU writes and flush a mapped region before the display reads it.
///
/// `pixels` must be the start of a page-aligned mapping.
pub fn sync_mapping(pixels: &[u8]) -> io::Result<()> {
    fence(Ordering::SeqCst);

    if pixels.is_empty() {
        return Ok(());
    }

    // SAFETY: the range is a live shared mapping owned by the caller.
    let ret = unsafe {
        libc::msync(
            pixels.as_ptr() as *mut libc::c_void,
            pixels.len(),
            libc::MS_SYNC,
        )
    };
    if ret < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
