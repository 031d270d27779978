//! iOS screens via UIKit (`UIScreen`).
//!
//! UIKit has no Rust bindings in this workspace, so the handful of
//! selectors needed are sent directly.  A screen's id is its index in
//! `[UIScreen screens]` at enumeration time.  UIKit reports no depth, so
//! every screen is 24 bpp.
//!
//! The enumerated `UIScreen` objects are retained, so a mode change goes to
//! the screen the caller was shown and is matched against that screen's
//! current `availableModes`, not its position in a list that may have moved.

use std::cell::RefCell;
use std::sync::mpsc::Sender;

use easel_core::{
    Area, DisplayEvent, DisplayId, Resolution, ScreenRecord, DEFAULT_BITS_PER_PIXEL,
};
use objc2::rc::Retained;
use objc2::runtime::NSObject;
use objc2::{class, msg_send};
use objc2_foundation::{NSArray, NSRect, NSSize};
use tracing::debug;

use crate::application::displays::{ScreenError, ScreenSource};

#[link(name = "UIKit", kind = "framework")]
extern "C" {}

/// iOS implementation of [`ScreenSource`].
#[derive(Debug, Default)]
pub struct IosScreenSource {
    /// Screens from the last `enumerate`, indexed by `DisplayId`.
    screens: RefCell<Vec<Retained<NSObject>>>,
}

impl IosScreenSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn screen(&self, id: DisplayId) -> Option<Retained<NSObject>> {
        let mut screens = self.screens.borrow_mut();
        if screens.is_empty() {
            *screens = all_screens();
        }
        screens.get(id.0 as usize).cloned()
    }
}

impl ScreenSource for IosScreenSource {
    fn enumerate(&self) -> Result<Vec<ScreenRecord>, ScreenError> {
        let screens = all_screens();
        let records = screens
            .iter()
            .enumerate()
            .map(|(index, screen)| record_for(index, screen))
            .collect();
        *self.screens.borrow_mut() = screens;
        Ok(records)
    }

    fn watch(&self, _events: Sender<DisplayEvent>) -> Result<(), ScreenError> {
        Err(ScreenError::Unsupported("UIScreen connection changes are not tracked"))
    }

    fn set_mode(&self, id: DisplayId, mode: Resolution) -> Result<(), ScreenError> {
        let screen = self.screen(id).ok_or(ScreenError::UnknownDisplay(id))?;
        let live = available_modes(&screen);
        let sizes: Vec<Resolution> = live.iter().map(|m| mode_size(&m)).collect();
        let index = live_mode_index(&sizes, mode)
            .ok_or_else(|| ScreenError::Platform(format!("{id} no longer offers {mode}")))?;
        let Some(ui_mode) = live.iter().nth(index) else {
            return Err(ScreenError::Platform(format!("{id} mode list changed")));
        };

        debug!(%id, %mode, index, "setting UIScreen currentMode");
        let _: () = unsafe { msg_send![&*screen, setCurrentMode: &*ui_mode] };
        Ok(())
    }
}

/// Position of `mode` in the screen's current mode sizes.
fn live_mode_index(live: &[Resolution], mode: Resolution) -> Option<usize> {
    live.iter().position(|&size| size == mode)
}

fn mode_size(mode: &NSObject) -> Resolution {
    let size: NSSize = unsafe { msg_send![mode, size] };
    Resolution::new(size.width as i32, size.height as i32)
}

/// `[UIScreen screens]`, or just `[UIScreen mainScreen]` if that is empty.
fn all_screens() -> Vec<Retained<NSObject>> {
    let screens: Retained<NSArray<NSObject>> = unsafe { msg_send![class!(UIScreen), screens] };
    let mut list: Vec<Retained<NSObject>> = screens.iter().collect();
    if list.is_empty() {
        let main: Retained<NSObject> = unsafe { msg_send![class!(UIScreen), mainScreen] };
        list.push(main);
    }
    list
}

fn available_modes(screen: &NSObject) -> Retained<NSArray<NSObject>> {
    unsafe { msg_send![screen, availableModes] }
}

fn record_for(index: usize, screen: &NSObject) -> ScreenRecord {
    let frame: NSRect = unsafe { msg_send![screen, bounds] };
    let scale: f64 = unsafe { msg_send![screen, scale] };
    let supported_resolutions = available_modes(screen)
        .iter()
        .map(|mode| mode_size(&mode))
        .collect();
    let (origin, size) = (frame.origin, frame.size);

    ScreenRecord {
        id: DisplayId(index as u32),
        bounds: Area::from_frame(origin.x, origin.y, size.width, size.height),
        content_scale: scale as f32,
        bits_per_pixel: DEFAULT_BITS_PER_PIXEL,
        supported_resolutions,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
