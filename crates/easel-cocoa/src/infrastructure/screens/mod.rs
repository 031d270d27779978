//! Platform-specific screen enumeration and reconfiguration tracking.
//!
//! Each platform implements [`ScreenSource`]; the right one is selected at
//! compile time and returned by [`native_screen_source`]:
//!
//! | Module  | OS    | API used                                                     |
//! |---------|-------|--------------------------------------------------------------|
//! | `macos` | macOS | `NSScreen` + `CGDisplayRegisterReconfigurationCallback`      |
//! | `ios`   | iOS   | `UIScreen` (`screens`, `availableModes`, `setCurrentMode:`)  |
//!
//! Other targets get [`UnsupportedScreenSource`], which reports every call
//! as unsupported so the service logs a warning and tracks no displays.
//! [`FixedScreenSource`] is always compiled so tests on any platform can use
//! it without a physical display.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard};

use easel_core::{Area, DisplayEvent, DisplayId, Resolution, ScreenRecord};
use tracing::debug;

use crate::application::displays::{ScreenError, ScreenSource};

// ── macOS implementation ──────────────────────────────────────────────────────

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "macos")]
pub use macos::MacosScreenSource as NativeScreenSource;

// ── iOS implementation ────────────────────────────────────────────────────────

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(target_os = "ios")]
pub use ios::IosScreenSource as NativeScreenSource;

/// The screen backend for this target.
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub fn native_screen_source() -> Box<dyn ScreenSource> {
    Box::new(NativeScreenSource::new())
}

/// The screen backend for this target.
#[cfg(not(any(target_os = "macos", target_os = "ios")))]
pub fn native_screen_source() -> Box<dyn ScreenSource> {
    Box::new(UnsupportedScreenSource)
}

// ── Unsupported implementation ────────────────────────────────────────────────

const NO_SCREEN_API: &str = "no native screen API on this platform";

/// Screen source for targets without a native backend.  Every call fails
/// with [`ScreenError::Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedScreenSource;

impl ScreenSource for UnsupportedScreenSource {
    fn enumerate(&self) -> Result<Vec<ScreenRecord>, ScreenError> {
        Err(ScreenError::Unsupported(NO_SCREEN_API))
    }

    fn watch(&self, _events: Sender<DisplayEvent>) -> Result<(), ScreenError> {
        Err(ScreenError::Unsupported(NO_SCREEN_API))
    }

    fn set_mode(&self, _id: DisplayId, _mode: Resolution) -> Result<(), ScreenError> {
        Err(ScreenError::Unsupported(NO_SCREEN_API))
    }
}

// ── Fixed implementation (always compiled) ────────────────────────────────────

#[derive(Debug, Default)]
struct FixedState {
    records: Vec<ScreenRecord>,
    watcher: Option<Sender<DisplayEvent>>,
    applied_modes: Vec<(DisplayId, Resolution)>,
}

/// A screen source that reports a configurable list of screens.
///
/// Clones share state, so a test can hand one clone to a `DisplayService`
/// and keep another to change the screen list or emit reconfiguration
/// events.
#[derive(Debug, Clone, Default)]
pub struct FixedScreenSource {
    state: Arc<Mutex<FixedState>>,
}

impl FixedScreenSource {
    pub fn new(records: Vec<ScreenRecord>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FixedState {
                records,
                ..FixedState::default()
            })),
        }
    }

    /// One 1920×1080 main display at the origin.
    pub fn single_1080p() -> Self {
        Self::new(vec![ScreenRecord {
            id: DisplayId(1),
            bounds: Area::new(0, 0, 1920, 1080),
            content_scale: 1.0,
            bits_per_pixel: 24,
            supported_resolutions: vec![
                Resolution::new(1920, 1080),
                Resolution::new(1280, 720),
            ],
        }])
    }

    /// Two 2560×1440 Retina displays side by side, main on the left.
    pub fn dual_1440p() -> Self {
        let modes = vec![
            Resolution::new(2560, 1440),
            Resolution::new(1920, 1080),
            Resolution::new(1280, 720),
        ];
        Self::new(vec![
            ScreenRecord {
                id: DisplayId(1),
                bounds: Area::new(0, 0, 2560, 1440),
                content_scale: 2.0,
                bits_per_pixel: 24,
                supported_resolutions: modes.clone(),
            },
            ScreenRecord {
                id: DisplayId(2),
                bounds: Area::new(2560, 0, 5120, 1440),
                content_scale: 2.0,
                bits_per_pixel: 24,
                supported_resolutions: modes,
            },
        ])
    }

    /// Replaces the list returned by the next `enumerate`.
    pub fn set_records(&self, records: Vec<ScreenRecord>) {
        self.lock().records = records;
    }

    /// Delivers `event` as if the OS had reported it.  Returns `false` if
    /// nothing is watching.
    pub fn emit(&self, event: DisplayEvent) -> bool {
        match &self.lock().watcher {
            Some(tx) => tx.send(event).is_ok(),
            None => false,
        }
    }

    pub fn is_watched(&self) -> bool {
        self.lock().watcher.is_some()
    }

    /// Modes accepted by `set_mode`, oldest first.
    pub fn applied_modes(&self) -> Vec<(DisplayId, Resolution)> {
        self.lock().applied_modes.clone()
    }

    fn lock(&self) -> MutexGuard<'_, FixedState> {
        // A poisoned lock only means a test panicked mid-update.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ScreenSource for FixedScreenSource {
    fn enumerate(&self) -> Result<Vec<ScreenRecord>, ScreenError> {
        Ok(self.lock().records.clone())
    }

    fn watch(&self, events: Sender<DisplayEvent>) -> Result<(), ScreenError> {
        self.lock().watcher = Some(events);
        Ok(())
    }

    fn set_mode(&self, id: DisplayId, mode: Resolution) -> Result<(), ScreenError> {
        let mut state = self.lock();
        let record = state
            .records
            .iter()
            .find(|r| r.id == id)
            .ok_or(ScreenError::UnknownDisplay(id))?;
        if !record.supported_resolutions.contains(&mode) {
            return Err(ScreenError::Platform(format!("{id} does not offer {mode}")));
        }
        debug!(%id, %mode, "fixed source switching mode");
        state.applied_modes.push((id, mode));
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
