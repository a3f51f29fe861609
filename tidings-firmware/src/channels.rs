//! Inter-task signals
//!
//! The notification queue and the ANCS inbox are constructed in `main` and
//! passed into their tasks by reference; the readiness signal below is the
//! only process-wide handle.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Raised once the initial screen has been drawn and the feed can accept
/// notifications. The ANCS task waits on this instead of a warm-up delay.
pub static DISPLAY_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();
