//! Gives the native run loop time to deliver callbacks.
//!
//! Core Graphics reconfiguration callbacks only fire while the registering
//! thread's run loop runs.  An AppKit application gets that for free; a
//! command-line host must call [`run_for`] between calls to
//! `Platform::pump_display_events`.

use std::time::Duration;

/// Runs the current thread's run loop in the default mode for up to
/// `duration`, returning early once a source has been handled.
#[cfg(target_os = "macos")]
pub fn run_for(duration: Duration) {
    use core_foundation::runloop::{kCFRunLoopDefaultMode, CFRunLoop};

    let _ = CFRunLoop::run_in_mode(unsafe { kCFRunLoopDefaultMode }, duration, true);
}

/// Sleeps for `duration`; there is no run loop to drive here.
#[cfg(not(target_os = "macos"))]
pub fn run_for(duration: Duration) {
    std::thread::sleep(duration);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_run_for_returns_within_a_generous_bound() {
        let start = Instant::now();
        run_for(Duration::from_millis(10));
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
