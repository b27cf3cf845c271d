//! Pixel view over a linear XRGB8888 buffer.
//!
//! The bytes usually live in a mapped dumb buffer, but any `&mut [u8]` with a
//! matching geometry works, which is what the tests use.

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::{Rgb888, RgbColor},
    Pixel,
};

use crate::error::{DisplayError, Result};

/// Bytes per pixel for XRGB8888
pub const BYTES_PER_PIXEL: u32 = 4;

/// Bounds-checked 32-bit pixel writer
pub struct Canvas<'a> {
    pixels: &'a mut [u8],
    width: u32,
    height: u32,
    stride: u32,
}

impl<'a> Canvas<'a> {
    /// Wrap `pixels` as a `width` x `height` image with `stride` bytes per row.
    pub fn new(pixels: &'a mut [u8], width: u32, height: u32, stride: u32) -> Result<Self> {
        let row = width as usize * BYTES_PER_PIXEL as usize;
        let required = stride as usize * height as usize;

        if (stride as usize) < row || pixels.len() < required {
            return Err(DisplayError::BufferTooSmall {
                len: pixels.len(),
                required: required.max(row * height as usize),
            });
        }

        Ok(Self {
            pixels,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Zero every byte of the buffer, padding included.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Write one pixel. Coordinates outside the image are ignored.
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Rgb888) {
        if let Some(offset) = self.offset(x, y) {
            self.pixels[offset..offset + 4].copy_from_slice(&encode_xrgb(color).to_le_bytes());
        }
    }

    /// Raw XRGB value at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        let offset = self.offset(x, y)?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.pixels[offset..offset + 4]);
        Some(u32::from_le_bytes(raw))
    }

    /// The underlying bytes, for syncing and presenting.
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.stride as usize + x as usize * BYTES_PER_PIXEL as usize)
    }
}

/// Pack a colour as `0x00RRGGBB`.
pub fn encode_xrgb(color: Rgb888) -> u32 {
    (u32::from(color.r()) << 16) | (u32::from(color.g()) << 8) | u32::from(color.b())
}

impl OriginDimensions for Canvas<'_> {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Canvas<'_> {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.put_pixel(coord.x, coord.y, color);
        }
        Ok(())
    }
}
