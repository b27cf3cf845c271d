//! Configuration for the triangle demo.
//!
//! Everything is optional. The file is read from `/etc/kms-triangle/config.yaml`
//! unless `KMS_TRIANGLE_CONFIG` points elsewhere; a missing file means defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::DisplayError;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "/etc/kms-triangle/config.yaml";

/// Environment variable overriding the configuration file path
pub const CONFIG_PATH_ENV: &str = "KMS_TRIANGLE_CONFIG";

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Log level (trace, debug, info, warn, error), used when RUST_LOG is unset
    pub log_level: String,

    /// Log format (pretty, json)
    pub log_format: LogFormat,

    /// Device discovery
    pub device: DeviceConfig,

    /// Frame pacing
    pub frame: FrameConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            device: DeviceConfig::default(),
            frame: FrameConfig::default(),
        }
    }
}

/// Log format options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Which device nodes to try
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Card index is appended to this prefix
    pub path_prefix: String,

    /// Number of card indices to try, starting at 0
    pub max_cards: u32,

    /// Ask the kernel to re-probe connectors while querying them
    pub force_probe: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            path_prefix: "/dev/dri/card".to_string(),
            max_cards: 8,
            force_probe: false,
        }
    }
}

impl DeviceConfig {
    /// Candidate device paths, in the order they are tried.
    pub fn candidate_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        (0..self.max_cards).map(move |i| PathBuf::from(format!("{}{}", self.path_prefix, i)))
    }
}

/// Frame pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Frames per second the loop pads itself to
    pub target_fps: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { target_fps: 60 }
    }
}

impl FrameConfig {
    /// Time budget for a single frame
    pub fn budget(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.target_fps.max(1)))
    }
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults(PathBuf),
}

impl DemoConfig {
    /// Load configuration from `KMS_TRIANGLE_CONFIG` or the default path.
    pub fn load() -> Result<(Self, ConfigSource)> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from_path(&path)
    }

    /// Load configuration from a specific path. A missing file yields defaults.
    pub fn load_from_path(path: &Path) -> Result<(Self, ConfigSource)> {
        if !path.exists() {
            return Ok((Self::default(), ConfigSource::Defaults(path.to_path_buf())));
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: DemoConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;

        Ok((config, ConfigSource::File(path.to_path_buf())))
    }

    /// Reject values the demo cannot run with.
    pub fn validate(&self) -> std::result::Result<(), DisplayError> {
        if self.device.max_cards == 0 {
            return Err(DisplayError::InvalidConfig(
                "device.max_cards must be at least 1".to_string(),
            ));
        }
        if !(1..=1000).contains(&self.frame.target_fps) {
            return Err(DisplayError::InvalidConfig(format!(
                "frame.target_fps must be between 1 and 1000, got {}",
                self.frame.target_fps
            )));
        }
        Ok(())
    }
}
