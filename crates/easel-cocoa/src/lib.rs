//! easel-cocoa library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the `easel-probe` binary share the same module tree.
//!
//! # What does easel-cocoa do?
//!
//! It is the Apple platform layer of the Easel creative-coding framework:
//!
//! 1. Resolves resources inside the application bundle and finds the
//!    `assets` directory.
//! 2. Presents native open, folder, and save panels.
//! 3. Enumerates displays and keeps the list current as monitors are
//!    plugged in, unplugged, rearranged, or promoted to main.
//!
//! The services in [`application`] depend only on traits; the adapters in
//! [`infrastructure`] implement those traits with AppKit, UIKit, Foundation,
//! and Core Graphics, selected at compile time with `#[cfg(target_os)]`.

/// Application layer: the platform services and their OS-facing traits.
pub mod application;

/// Infrastructure layer: native adapters and configuration storage.
pub mod infrastructure;

pub use application::platform::Platform;
