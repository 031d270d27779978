//! Infrastructure layer for the platform services.
//!
//! Contains the OS-facing adapters and configuration storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `easel_core`, but MUST NOT be imported by the `application` or domain
//! layers.
//!
//! # Sub-modules
//!
//! - **`bundle`** – `ResourceBundle` implementations: `FoundationBundle`
//!   (NSBundle, Apple targets) and `DirectoryBundle` (a bundle laid out on
//!   disk, used elsewhere and in tests).
//!
//! - **`dialogs`** – `FileDialogs` implementations: `CocoaFileDialogs`
//!   (NSOpenPanel / NSSavePanel, macOS) and `HeadlessFileDialogs`.
//!
//! - **`screens`** – `ScreenSource` implementations: NSScreen + Core
//!   Graphics on macOS, UIScreen on iOS, `UnsupportedScreenSource`
//!   elsewhere, and `FixedScreenSource` for tests.
//!
//! - **`run_loop`** – lets the native run loop deliver callbacks.
//!
//! - **`storage`** – TOML configuration.

pub mod bundle;
pub mod dialogs;
pub mod run_loop;
pub mod screens;
pub mod storage;

use tracing::warn;

use crate::application::dialogs::DialogService;
use crate::application::displays::DisplayService;
use crate::application::platform::Platform;
use crate::application::resources::ResourceService;
use storage::config::PlatformConfig;

/// Builds a [`Platform`] wired to this target's native adapters.
///
/// Must be called on the main thread on macOS for the AppKit panels and
/// NSScreen queries to be available.
pub fn native_platform(config: &PlatformConfig) -> Platform {
    let mut resources = ResourceService::new(bundle::default_bundle);
    resources.set_assets_dir_name(config.resources.assets_dir_name.clone());
    if let Some(path) = &config.resources.bundle_path {
        match bundle::bundle_at(path) {
            Some(b) => resources.set_bundle(b),
            None => warn!(path = %path.display(), "configured bundle not found; using default"),
        }
    }

    let dialogs = DialogService::new(dialogs::native_dialogs());
    let displays = DisplayService::new(screens::native_screen_source())
        .with_watch(config.displays.watch_reconfiguration);

    Platform::new(resources, dialogs, displays)
}
