//! kms-triangle
//!
//! Takes no arguments. Exits 1 if the display cannot be set up, 0 after
//! SIGINT/SIGTERM.

use std::process::ExitCode;

use tracing::{error, info};

use kms_triangle::config::{ConfigSource, DemoConfig};
use kms_triangle::{app, logging, shutdown};

fn main() -> ExitCode {
    let (config, source) = match DemoConfig::load() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("kms-triangle: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init_logging(&config.log_level, config.log_format) {
        eprintln!("kms-triangle: {:#}", e);
        return ExitCode::FAILURE;
    }

    info!(version = env!("CARGO_PKG_VERSION"), "Starting kms-triangle");
    match &source {
        ConfigSource::File(path) => info!(path = %path.display(), "Configuration loaded"),
        ConfigSource::Defaults(path) => {
            info!(path = %path.display(), "Config file not found, using defaults")
        }
    }

    let shutdown = match shutdown::install() {
        Ok(flag) => flag,
        Err(e) => {
            error!(error = %e, "Failed to install signal handlers");
            return ExitCode::FAILURE;
        }
    };

    match app::run(&config, shutdown) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
