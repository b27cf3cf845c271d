//! Cooperative shutdown on SIGINT / SIGTERM.
//!
//! The handler only stores into a static atomic; the animation loop polls it
//! once per frame.

use std::ffi::c_int;
use std::sync::atomic::{AtomicBool, Ordering};

use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

extern "C" fn on_signal(_signal: c_int) {
    SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
}

/// Install handlers for SIGINT and SIGTERM and return the flag they set.
pub fn install() -> nix::Result<&'static AtomicBool> {
    let action = SigAction::new(
        SigHandler::Handler(on_signal),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );

    for signal in [Signal::SIGINT, Signal::SIGTERM] {
        // SAFETY: the handler only performs an atomic store, which is
        // async-signal-safe.
        unsafe { sigaction(signal, &action) }?;
    }

    Ok(&SHUTDOWN_REQUESTED)
}
