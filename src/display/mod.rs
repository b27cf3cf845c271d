//! DRM/KMS display backend.
//!
//! Talks to the kernel through the `drm` crate:
//! - `card.rs` - device node discovery and master lock
//! - `session.rs` - connector, encoder, CRTC and mode selection
//! - `dumb.rs` - dumb buffer + framebuffer object, CPU mapping
//! - `scanout.rs` - memory sync and CRTC commit per frame
//!
//! Resources are released by `Drop` in reverse order of acquisition:
//! mapping, framebuffer object, dumb buffer, master lock, descriptor.

mod card;
mod dumb;
mod scanout;
mod session;

pub use card::Card;
pub use dumb::DumbFramebuffer;
pub use scanout::{sync_mapping, DrmScanout, Scanout};
pub use session::{pick_connector, ConnectorPick, ConnectorSummary, DisplaySession};
