//! Software rendering into the mapped framebuffer.
//!
//! - `canvas.rs` - bounds-checked XRGB8888 pixel view, `DrawTarget` impl
//! - `raster.rs` - triangle pose, vertex rotation, Bresenham lines

pub mod canvas;
pub mod raster;

pub use canvas::Canvas;
pub use raster::{draw_triangle, TrianglePose, Vertex};
