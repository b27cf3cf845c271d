//! Connector / encoder / CRTC / mode selection and presentation.

use std::io;

use drm::control::{connector, crtc, framebuffer, Device as ControlDevice, Mode};
use tracing::{debug, info};

use super::card::Card;
use crate::error::{DisplayError, Result};

/// What connector selection needs to know about one connector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectorSummary {
    pub connected: bool,
    pub mode_count: usize,
}

/// How the connector was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorPick {
    /// First connected connector with modes
    Connected(usize),
    /// No connector reported connected; first connector with modes
    Fallback(usize),
}

impl ConnectorPick {
    pub fn index(self) -> usize {
        match self {
            ConnectorPick::Connected(i) | ConnectorPick::Fallback(i) => i,
        }
    }
}

/// Pick a connector: the first connected one with modes, otherwise the first
/// one with any modes at all. Ties go to the lowest index.
pub fn pick_connector(connectors: &[ConnectorSummary]) -> Option<ConnectorPick> {
    if let Some(i) = connectors
        .iter()
        .position(|c| c.connected && c.mode_count > 0)
    {
        return Some(ConnectorPick::Connected(i));
    }

    connectors
        .iter()
        .position(|c| c.mode_count > 0)
        .map(ConnectorPick::Fallback)
}

/// The display pipeline chosen for output
#[derive(Debug, Clone)]
pub struct DisplaySession {
    connector: connector::Handle,
    crtc: crtc::Handle,
    mode: Mode,
}

impl DisplaySession {
    /// Choose connector, mode, encoder and CRTC on `card`.
    pub fn configure(card: &Card, force_probe: bool) -> Result<Self> {
        let resources = card.resource_handles().map_err(DisplayError::Resources)?;

        info!(count = resources.connectors().len(), "Found {} connectors", resources.connectors().len());

        let mut infos: Vec<connector::Info> = Vec::new();
        for (i, handle) in resources.connectors().iter().enumerate() {
            match card.get_connector(*handle, force_probe) {
                Ok(info) => {
                    info!(
                        index = i,
                        interface = ?info.interface(),
                        state = ?info.state(),
                        modes = info.modes().len(),
                        "Connector {}: connection={:?}, modes={}",
                        i,
                        info.state(),
                        info.modes().len()
                    );
                    infos.push(info);
                }
                Err(e) => debug!(index = i, error = %e, "Skipping connector"),
            }
        }

        let summaries: Vec<ConnectorSummary> = infos
            .iter()
            .map(|c| ConnectorSummary {
                connected: c.state() == connector::State::Connected,
                mode_count: c.modes().len(),
            })
            .collect();

        let pick = pick_connector(&summaries);
        if !matches!(pick, Some(ConnectorPick::Connected(_))) {
            info!("No connected connector found, trying first available connector");
        }
        let pick = pick.ok_or(DisplayError::NoConnector)?;
        if let ConnectorPick::Fallback(i) = pick {
            info!(modes = summaries[i].mode_count, "Using connector with {} modes", summaries[i].mode_count);
        }

        let connector = &infos[pick.index()];
        // Presence of at least one mode is guaranteed by the pick
        let mode = *connector.modes().first().ok_or(DisplayError::NoConnector)?;

        let encoder_handle = connector.current_encoder().ok_or(DisplayError::NoEncoder)?;
        let encoder = card
            .get_encoder(encoder_handle)
            .map_err(|_| DisplayError::NoEncoder)?;

        let crtc_handle = encoder.crtc().ok_or(DisplayError::NoCrtc)?;
        let crtc = card.get_crtc(crtc_handle).map_err(|_| DisplayError::NoCrtc)?;

        let (width, height) = mode.size();
        info!(
            mode = ?mode.name(),
            width = width,
            height = height,
            refresh = mode.vrefresh(),
            encoder = ?encoder.handle(),
            crtc = ?crtc.handle(),
            "Display mode selected"
        );

        Ok(Self {
            connector: connector.handle(),
            crtc: crtc.handle(),
            mode,
        })
    }

    /// Mode resolution in pixels.
    pub fn size(&self) -> (u32, u32) {
        let (w, h) = self.mode.size();
        (u32::from(w), u32::from(h))
    }

    /// Scan `fb` out on the selected CRTC/connector/mode. Blocks until the
    /// kernel has applied the configuration.
    pub fn present(&self, card: &Card, fb: framebuffer::Handle) -> io::Result<()> {
        card.set_crtc(self.crtc, Some(fb), (0, 0), &[self.connector], Some(self.mode))
    }
}
