//! Error types for the display layer.

use std::io;

use thiserror::Error;

/// Errors that can occur while setting up or driving the display.
#[derive(Error, Debug)]
pub enum DisplayError {
    /// No `/dev/dri/card*` node could be opened.
    #[error("Failed to open any DRM device: {0}")]
    NoDevice(#[source] io::Error),

    /// The kernel refused to enumerate mode-setting resources.
    #[error("Failed to get DRM resources: {0}")]
    Resources(#[source] io::Error),

    /// No connector offers a display mode.
    #[error("No usable connector found")]
    NoConnector,

    /// The selected connector has no encoder bound to it.
    #[error("No encoder found")]
    NoEncoder,

    /// The encoder has no CRTC bound to it, or the CRTC query failed.
    #[error("No CRTC found")]
    NoCrtc,

    #[error("Failed to create dumb buffer: {0}")]
    CreateDumbBuffer(#[source] io::Error),

    #[error("Failed to add framebuffer: {0}")]
    AddFramebuffer(#[source] io::Error),

    #[error("Failed to map dumb buffer: {0}")]
    MapDumbBuffer(#[source] io::Error),

    /// A pixel view was requested over fewer bytes than its geometry needs.
    #[error("Pixel buffer too small: {len} bytes, need {required}")]
    BufferTooSmall { len: usize, required: usize },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for display operations.
pub type Result<T> = std::result::Result<T, DisplayError>;
