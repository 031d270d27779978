//! DisplayService: display enumeration and hot-plug tracking.
//!
//! # Event flow
//!
//! ```text
//! OS reconfiguration callback (run loop thread)
//!   └─ ScreenSource adapter: classify flags, read geometry
//!        └─ mpsc::Sender<DisplayEvent>
//!             └─ DisplayService::pump_events()   (owning thread)
//!                  └─ DisplayRegistry::apply()   → DisplayObserver
//! ```
//!
//! The callback never touches the registry.  Everything downstream of the
//! channel runs on the thread that owns the service, which on Apple
//! platforms is the main thread that also runs the run loop.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use easel_core::{
    closest_resolution_index, DisplayEvent, DisplayId, DisplayObserver, DisplayRef,
    DisplayRegistry, Resolution, ScreenRecord,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Error type for screen enumeration and mode changes.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// The platform API call failed.
    #[error("platform API error while querying screens: {0}")]
    Platform(String),

    /// The display is not known to the OS.
    #[error("unknown display: {0}")]
    UnknownDisplay(DisplayId),

    /// The operation does not exist on this platform.
    #[error("not supported on this platform: {0}")]
    Unsupported(&'static str),
}

/// OS-facing screen adapter.
#[cfg_attr(test, mockall::automock)]
pub trait ScreenSource {
    /// Returns the live screen list.  The first record MUST be the main
    /// display.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Platform`] if the OS query fails.
    fn enumerate(&self) -> Result<Vec<ScreenRecord>, ScreenError>;

    /// Registers for reconfiguration notifications.  Each OS notification
    /// that the registry cares about is sent on `events`.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Platform`] if registration fails, or
    /// [`ScreenError::Unsupported`] where the OS offers no such callback.
    fn watch(&self, events: Sender<DisplayEvent>) -> Result<(), ScreenError>;

    /// Switches a display to `mode`, one of the sizes it reported in
    /// `supported_resolutions`.  The mode is passed by value so the adapter
    /// can match it against the live OS mode list, which may have changed
    /// since the last enumeration.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::UnknownDisplay`], [`ScreenError::Platform`] if
    /// the display no longer offers `mode`, or [`ScreenError::Unsupported`].
    fn set_mode(&self, id: DisplayId, mode: Resolution) -> Result<(), ScreenError>;
}

/// Tracks the displays attached to the machine.
pub struct DisplayService {
    source: Box<dyn ScreenSource>,
    registry: DisplayRegistry,
    events_tx: Sender<DisplayEvent>,
    events_rx: Receiver<DisplayEvent>,
    watch_enabled: bool,
    watch_registered: bool,
}

impl DisplayService {
    pub fn new(source: Box<dyn ScreenSource>) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            source,
            registry: DisplayRegistry::new(),
            events_tx,
            events_rx,
            watch_enabled: true,
            watch_registered: false,
        }
    }

    /// Disables registration of the OS reconfiguration callback.  Must be
    /// called before the first enumeration to have any effect.
    pub fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    /// Installs the observer that hears about connects, disconnects, and
    /// changes.
    pub fn set_observer(&mut self, observer: Arc<dyn DisplayObserver>) {
        self.registry.set_observer(observer);
    }

    /// Returns the tracked displays, main display first.
    ///
    /// The first call registers for reconfiguration notifications and
    /// enumerates; later calls return the memoized list unless
    /// `force_refresh` is set.  If the OS query fails the previous list
    /// (empty on first use) is returned and a warning is logged.
    pub fn displays(&mut self, force_refresh: bool) -> &[DisplayRef] {
        if !self.registry.is_initialized() && !self.watch_registered && self.watch_enabled {
            self.watch_registered = true;
            match self.source.watch(self.events_tx.clone()) {
                Ok(()) => debug!("display reconfiguration callback registered"),
                Err(e) => warn!("display reconfiguration callback not registered: {e}"),
            }
        }

        if force_refresh || !self.registry.is_initialized() {
            match self.source.enumerate() {
                Ok(records) => {
                    info!(count = records.len(), "displays enumerated");
                    self.registry.populate(records);
                }
                Err(e) => warn!("display enumeration failed: {e}"),
            }
        }

        self.registry.displays()
    }

    /// The main display, enumerating first if needed.
    pub fn main_display(&mut self) -> Option<DisplayRef> {
        self.displays(false).first().cloned()
    }

    pub fn find(&self, id: DisplayId) -> Option<DisplayRef> {
        self.registry.find(id)
    }

    pub fn display_for_point(&self, x: i32, y: i32) -> Option<DisplayRef> {
        self.registry.display_for_point(x, y)
    }

    pub fn registry(&self) -> &DisplayRegistry {
        &self.registry
    }

    /// A sender feeding the same queue as the OS callback.  Hosts that
    /// receive screen notifications through their own event loop can
    /// forward them here.
    pub fn event_sender(&self) -> Sender<DisplayEvent> {
        self.events_tx.clone()
    }

    /// Applies all queued reconfiguration events.
    ///
    /// Returns the number of events that changed the registry.
    pub fn pump_events(&mut self) -> usize {
        let mut changed = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            debug!(id = %event.display_id(), "applying display event");
            if self.registry.apply(event) {
                changed += 1;
            }
        }
        changed
    }

    /// Switches `display` to the supported mode nearest `requested`.
    ///
    /// Returns the mode that was applied, or `None` if the display has no
    /// modes or the OS refused.
    pub fn set_resolution(
        &self,
        display: &DisplayRef,
        requested: Resolution,
    ) -> Option<Resolution> {
        let id = display.id();
        let modes = display.supported_resolutions();
        let Some(index) = closest_resolution_index(modes, requested) else {
            warn!(%id, "display reports no supported resolutions");
            return None;
        };
        let applied = modes[index];

        match self.source.set_mode(id, applied) {
            Ok(()) => {
                info!(%id, %requested, %applied, "resolution changed");
                Some(applied)
            }
            Err(e) => {
                warn!(%id, "failed to set resolution: {e}");
                None
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
