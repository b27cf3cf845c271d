//! # kms-triangle
//!
//! Draws a rotating wireframe triangle straight into a DRM/KMS dumb buffer,
//! no display server involved.
//!
//! ```text
//! open card -> pick connector/encoder/CRTC/mode -> dumb buffer + mmap
//!           -> loop { clear, rasterize, sync, set_crtc, pace }
//!           -> release in reverse order
//! ```
//!
//! The rasterizer only needs an `embedded_graphics::DrawTarget`, so it is
//! tested against plain in-memory buffers.

pub mod animation;
pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod render;
pub mod shutdown;

pub use error::{DisplayError, Result};
