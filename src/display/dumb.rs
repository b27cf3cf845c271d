//! Dumb buffer allocation, framebuffer registration and mapping.

use drm::buffer::{Buffer, DrmFourcc};
use drm::control::dumbbuffer::{DumbBuffer, DumbMapping};
use drm::control::{framebuffer, Device as ControlDevice};
use tracing::{debug, info, warn};

use super::card::Card;
use crate::error::{DisplayError, Result};

/// Colour depth and bits per pixel handed to the kernel
const DEPTH: u32 = 24;
const BITS_PER_PIXEL: u32 = 32;

/// A dumb buffer registered as a scanout framebuffer.
///
/// Dropping it removes the framebuffer object and then destroys the buffer.
/// Mappings borrow it, so they are always gone first.
pub struct DumbFramebuffer<'c> {
    card: &'c Card,
    buffer: DumbBuffer,
    fb: framebuffer::Handle,
}

impl<'c> DumbFramebuffer<'c> {
    /// Allocate a `width` x `height` XRGB8888 buffer and register it.
    pub fn create(card: &'c Card, (width, height): (u32, u32)) -> Result<Self> {
        let buffer = card
            .create_dumb_buffer((width, height), DrmFourcc::Xrgb8888, BITS_PER_PIXEL)
            .map_err(DisplayError::CreateDumbBuffer)?;

        let fb = match card.add_framebuffer(&buffer, DEPTH, BITS_PER_PIXEL) {
            Ok(fb) => fb,
            Err(e) => {
                if let Err(e) = card.destroy_dumb_buffer(buffer) {
                    warn!(error = %e, "Failed to destroy dumb buffer");
                }
                return Err(DisplayError::AddFramebuffer(e));
            }
        };

        info!(
            width = width,
            height = height,
            pitch = buffer.pitch(),
            "Dumb framebuffer created"
        );

        Ok(Self { card, buffer, fb })
    }

    /// Framebuffer object id used for scanout
    pub fn handle(&self) -> framebuffer::Handle {
        self.fb
    }

    /// Bytes per row as chosen by the kernel
    pub fn pitch(&self) -> u32 {
        self.buffer.pitch()
    }

    pub fn size(&self) -> (u32, u32) {
        self.buffer.size()
    }

    /// Map the buffer read/write into this process. Unmapped on drop.
    pub fn map(&mut self) -> Result<DumbMapping<'_>> {
        let mut mapping = self
            .card
            .map_dumb_buffer(&mut self.buffer)
            .map_err(DisplayError::MapDumbBuffer)?;
        mapping.fill(0);
        debug!(bytes = mapping.len(), "Dumb buffer mapped");
        Ok(mapping)
    }
}

impl Drop for DumbFramebuffer<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.card.destroy_framebuffer(self.fb) {
            warn!(error = %e, "Failed to remove framebuffer");
        }
        if let Err(e) = self.card.destroy_dumb_buffer(self.buffer) {
            warn!(error = %e, "Failed to destroy dumb buffer");
        }
        debug!("Dumb framebuffer released");
    }
}
