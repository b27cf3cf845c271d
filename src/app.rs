//! Application flow: set up the display, run the animation, tear down.

use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::animation::{self, FramePacer};
use crate::config::DemoConfig;
use crate::display::{Card, DisplaySession, DrmScanout, DumbFramebuffer, Scanout};
use crate::render::Canvas;

/// What kind of session the program was started from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleKind {
    /// Neither `DISPLAY` nor `WAYLAND_DISPLAY` is set
    Virtual,
    /// Started under a display server
    DisplayServer,
}

impl ConsoleKind {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var_os("DISPLAY").is_some(),
            std::env::var_os("WAYLAND_DISPLAY").is_some(),
        )
    }

    pub fn from_vars(has_display: bool, has_wayland_display: bool) -> Self {
        if has_display || has_wayland_display {
            ConsoleKind::DisplayServer
        } else {
            ConsoleKind::Virtual
        }
    }

    pub fn is_virtual(self) -> bool {
        self == ConsoleKind::Virtual
    }
}

/// Run the demo until `shutdown` is set.
pub fn run(config: &DemoConfig, shutdown: &AtomicBool) -> Result<()> {
    let mut card = Card::open_first(&config.device)?;
    card.become_master();

    let session =
        DisplaySession::configure(&card, config.device.force_probe).context("Display setup failed")?;
    let (width, height) = session.size();

    let mut framebuffer =
        DumbFramebuffer::create(&card, (width, height)).context("Framebuffer setup failed")?;
    let fb = framebuffer.handle();
    let pitch = framebuffer.pitch();
    let mut mapping = framebuffer.map().context("Framebuffer setup failed")?;
    let mut canvas = Canvas::new(&mut mapping, width, height, pitch)?;

    info!(
        width = width,
        height = height,
        "Animated triangle rendering started ({}x{}). Press Ctrl+C to exit.",
        width,
        height
    );

    let console = ConsoleKind::from_env();
    if console.is_virtual() {
        info!("Virtual console detected - attempting direct DRM display...");
    }

    let mut scanout = DrmScanout::new(&card, &session, fb);
    match scanout.present(canvas.as_bytes()) {
        Ok(()) => {
            info!("Triangle animation displayed directly on screen!");
            if console.is_virtual() {
                info!("You should see the animated triangle on your display now.");
            }
        }
        Err(e) => {
            warn!(error = %e, "Warning: Failed to set CRTC - {}", e);
            if console.is_virtual() {
                info!("Try running as root: sudo kms-triangle");
                info!("Or switch to a virtual console (Ctrl+Alt+F3) and run there.");
            }
            info!("Continuing with framebuffer rendering only.");
        }
    }

    let pacer = FramePacer::new(config.frame.budget());
    let stats = animation::run(&mut canvas, &mut scanout, &pacer, shutdown);

    info!(
        frames = stats.frames,
        failed_presents = stats.failed_presents,
        "Animation stopped."
    );
    Ok(())
}
