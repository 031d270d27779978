//! The tracked display collection.
//!
//! # Ordering invariant
//!
//! `displays()[0]` is always the main display.  Enumeration builds the list
//! from an OS screen list whose first entry is the main screen, and a
//! "moved" event carrying the set-main flag moves the new main display to
//! the front while leaving everyone else in their relative order.
//!
//! # Threading
//!
//! The registry is not shared between threads.  The platform adapters queue
//! [`DisplayEvent`]s from their OS callbacks and the owning thread applies
//! them one at a time, so every mutation and every observer notification
//! happens on that thread.

use std::sync::Arc;

use tracing::{debug, warn};

use super::display::{Area, Display, DisplayId, DisplayRef, ScreenRecord};
use super::events::DisplayEvent;

/// Receives display lifecycle notifications.
///
/// Implemented by the framework's application object.  Each method is
/// called at most once per registry mutation.
pub trait DisplayObserver: Send + Sync {
    /// A display was added to the registry.
    fn display_connected(&self, display: &DisplayRef);
    /// A display was removed from the registry.  The handle is the removed
    /// record itself, so observers can match it against their own clones.
    fn display_disconnected(&self, display: &DisplayRef);
    /// A tracked display's bounds changed or it became the main display.
    fn display_changed(&self, display: &DisplayRef);
}

/// Ordered collection of tracked displays, main display first.
#[derive(Default)]
pub struct DisplayRegistry {
    displays: Vec<DisplayRef>,
    initialized: bool,
    observer: Option<Arc<dyn DisplayObserver>>,
}

impl DisplayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the observer that receives connect/disconnect/change
    /// notifications.  Without one, mutations happen silently.
    pub fn set_observer(&mut self, observer: Arc<dyn DisplayObserver>) {
        self.observer = Some(observer);
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Returns `true` once [`populate`](Self::populate) has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn displays(&self) -> &[DisplayRef] {
        &self.displays
    }

    pub fn len(&self) -> usize {
        self.displays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.displays.is_empty()
    }

    /// The main display, if any display is tracked.
    pub fn main_display(&self) -> Option<&DisplayRef> {
        self.displays.first()
    }

    /// Finds a tracked display by its OS identifier.
    pub fn find(&self, id: DisplayId) -> Option<DisplayRef> {
        self.displays.iter().find(|d| d.id() == id).cloned()
    }

    /// Returns the first display whose bounds contain the point.
    pub fn display_for_point(&self, x: i32, y: i32) -> Option<DisplayRef> {
        self.displays
            .iter()
            .find(|d| d.contains_point(x, y))
            .cloned()
    }

    /// Rebuilds the collection from a live screen list.
    ///
    /// `records[0]` must describe the main display.  Displays that are
    /// already tracked with the same depth, scale, and modes keep their
    /// existing handle (with bounds refreshed) so clones held elsewhere stay
    /// valid.  No notifications are sent.
    pub fn populate(&mut self, records: Vec<ScreenRecord>) {
        let previous = std::mem::take(&mut self.displays);
        self.displays = records
            .into_iter()
            .map(|record| {
                match previous.iter().find(|d| {
                    d.id() == record.id
                        && d.bits_per_pixel() == record.bits_per_pixel
                        && d.content_scale() == record.content_scale
                        && d.supported_resolutions() == record.supported_resolutions.as_slice()
                }) {
                    Some(existing) => {
                        existing.set_bounds(record.bounds);
                        Arc::clone(existing)
                    }
                    None => Arc::new(Display::from_record(record)),
                }
            })
            .collect();
        self.initialized = true;
        debug!(count = self.displays.len(), "display registry populated");
    }

    /// Applies one reconfiguration event.
    ///
    /// Returns `true` if the registry changed.
    pub fn apply(&mut self, event: DisplayEvent) -> bool {
        match event {
            DisplayEvent::Added(record) => self.handle_added(record),
            DisplayEvent::Removed(id) => self.handle_removed(id),
            DisplayEvent::Moved {
                id,
                bounds,
                set_main,
            } => self.handle_moved(id, bounds, set_main),
        }
    }

    /// Tracks a newly connected display and notifies the observer.
    ///
    /// A display that is already tracked is left alone and a warning is
    /// logged.
    pub fn handle_added(&mut self, record: ScreenRecord) -> bool {
        if self.find(record.id).is_some() {
            warn!(id = %record.id, "received add for an already known display");
            return false;
        }

        let id = record.id;
        let bounds = record.bounds;
        let display: DisplayRef = Arc::new(Display::from_record(record));
        debug!(%id, ?bounds, "display connected");
        self.displays.push(Arc::clone(&display));
        if let Some(observer) = &self.observer {
            observer.display_connected(&display);
        }
        true
    }

    /// Stops tracking a disconnected display and notifies the observer.
    ///
    /// An unknown display is logged as a warning and otherwise ignored.
    pub fn handle_removed(&mut self, id: DisplayId) -> bool {
        let Some(position) = self.displays.iter().position(|d| d.id() == id) else {
            warn!(id = %id, "received remove for an unknown display");
            return false;
        };

        let display = self.displays.remove(position);
        debug!(id = %id, "display disconnected");
        if let Some(observer) = &self.observer {
            observer.display_disconnected(&display);
        }
        true
    }

    /// Updates a display's geometry and main-display role.
    ///
    /// When `set_main` is true and the display is not already first, it is
    /// moved to the front.  The observer hears about it once if either the
    /// bounds or the main display changed.
    pub fn handle_moved(&mut self, id: DisplayId, bounds: Area, set_main: bool) -> bool {
        let Some(position) = self.displays.iter().position(|d| d.id() == id) else {
            warn!(id = %id, "received move for an unknown display");
            return false;
        };

        let new_main = set_main && position != 0;
        if new_main {
            let display = self.displays.remove(position);
            self.displays.insert(0, display);
        }

        let index = if new_main { 0 } else { position };
        let display = Arc::clone(&self.displays[index]);
        let new_bounds = display.set_bounds(bounds);

        if !(new_main || new_bounds) {
            return false;
        }
        debug!(id = %id, new_main, new_bounds, "display changed");
        if let Some(observer) = &self.observer {
            observer.display_changed(&display);
        }
        true
    }
}

impl std::fmt::Debug for DisplayRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayRegistry")
            .field("displays", &self.displays)
            .field("initialized", &self.initialized)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
