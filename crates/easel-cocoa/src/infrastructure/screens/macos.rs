//! macOS screens via AppKit (`NSScreen`) and Core Graphics.
//!
//! # Coordinates
//!
//! `NSScreen` frames have their origin at the bottom-left of the main
//! screen with Y pointing up.  Secondary screens are flipped into the
//! top-left space using the main screen's height; the main screen's frame is
//! used as-is since its origin is `(0, 0)` either way.  `CGDisplayBounds`
//! is already top-left, so geometry reported by reconfiguration callbacks is
//! not flipped.
//!
//! # Reconfiguration
//!
//! `watch` registers `CGDisplayRegisterReconfigurationCallback` with a boxed
//! context that owns the event sender.  Core Graphics only invokes the
//! callback while a run loop is running on the registering thread.  The
//! context is unregistered and freed when the source is dropped.

use std::cell::Cell;
use std::ffi::c_void;
use std::ptr::NonNull;
use std::sync::mpsc::Sender;

use core_graphics::display::{CGDirectDisplayID, CGDisplay};
use easel_core::{
    Area, ChangeSummaryFlags, DisplayEvent, DisplayId, ReconfigurationKind, Resolution,
    ScreenRecord,
};
use objc2::rc::Retained;
use objc2::{msg_send, MainThreadMarker};
use objc2_app_kit::{NSBitsPerPixelFromDepth, NSScreen};
use objc2_foundation::{NSNumber, NSString};
use tracing::{debug, error, warn};

use crate::application::displays::{ScreenError, ScreenSource};

type ReconfigurationCallback = extern "C" fn(CGDirectDisplayID, u32, *mut c_void);

#[link(name = "CoreGraphics", kind = "framework")]
extern "C" {
    fn CGDisplayRegisterReconfigurationCallback(
        callback: ReconfigurationCallback,
        user_info: *mut c_void,
    ) -> i32;
    fn CGDisplayRemoveReconfigurationCallback(
        callback: ReconfigurationCallback,
        user_info: *mut c_void,
    ) -> i32;
}

/// `kCGErrorSuccess`.
const CG_SUCCESS: i32 = 0;

/// State handed to Core Graphics as the callback's `user_info`.
struct WatchContext {
    events: Sender<DisplayEvent>,
}

/// macOS implementation of [`ScreenSource`].
#[derive(Default)]
pub struct MacosScreenSource {
    watch: Cell<Option<NonNull<WatchContext>>>,
}

impl MacosScreenSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn unregister(&self) {
        if let Some(ctx) = self.watch.take() {
            let callback_ctx = ctx.as_ptr().cast();
            let status = unsafe {
                CGDisplayRemoveReconfigurationCallback(reconfiguration_callback, callback_ctx)
            };
            if status != CG_SUCCESS {
                warn!(status, "CGDisplayRemoveReconfigurationCallback failed");
            }
            // SAFETY: the pointer came from Box::into_raw in `watch` and Core
            // Graphics no longer holds it.
            drop(unsafe { Box::from_raw(ctx.as_ptr()) });
        }
    }
}

impl Drop for MacosScreenSource {
    fn drop(&mut self) {
        self.unregister();
    }
}

impl ScreenSource for MacosScreenSource {
    #[allow(unused_unsafe)]
    fn enumerate(&self) -> Result<Vec<ScreenRecord>, ScreenError> {
        let mtm = MainThreadMarker::new().ok_or_else(|| {
            ScreenError::Platform("NSScreen must be queried on the main thread".into())
        })?;

        let screens = NSScreen::screens(mtm);
        let main = screens
            .firstObject()
            .ok_or_else(|| ScreenError::Platform("NSScreen reported no screens".into()))?;
        let main_height = unsafe { main.frame() }.size.height as i32;

        let mut records = Vec::with_capacity(screens.count());
        for (index, screen) in screens.iter().enumerate() {
            let Some(id) = screen_id(index, screen_number(&screen))? else {
                warn!(index, "NSScreen has no NSScreenNumber; skipping");
                continue;
            };
            let frame = unsafe { screen.frame() };
            let bounds = if index == 0 {
                let (origin, size) = (frame.origin, frame.size);
                Area::from_frame(origin.x, origin.y, size.width, size.height)
            } else {
                Area::from_bottom_left_frame(
                    frame.origin.x,
                    frame.origin.y,
                    frame.size.width,
                    frame.size.height,
                    main_height,
                )
            };
            records.push(ScreenRecord {
                id: DisplayId(id),
                bounds,
                content_scale: unsafe { screen.backingScaleFactor() } as f32,
                bits_per_pixel: bits_per_pixel(&screen),
                supported_resolutions: Vec::new(),
            });
        }
        Ok(records)
    }

    fn watch(&self, events: Sender<DisplayEvent>) -> Result<(), ScreenError> {
        self.unregister();

        let ctx = Box::into_raw(Box::new(WatchContext { events }));
        let status = unsafe {
            CGDisplayRegisterReconfigurationCallback(reconfiguration_callback, ctx.cast())
        };
        if status != CG_SUCCESS {
            // SAFETY: registration failed, so Core Graphics never saw `ctx`.
            drop(unsafe { Box::from_raw(ctx) });
            return Err(ScreenError::Platform(format!(
                "CGDisplayRegisterReconfigurationCallback returned {status}"
            )));
        }
        self.watch.set(NonNull::new(ctx));
        Ok(())
    }

    fn set_mode(&self, _id: DisplayId, _mode: Resolution) -> Result<(), ScreenError> {
        Err(ScreenError::Unsupported("display modes are not switched on macOS"))
    }
}

/// The id for the screen at `index`, or `None` to skip it.  The main screen
/// (index 0) cannot be skipped without breaking the main-first order.
fn screen_id(index: usize, number: Option<u32>) -> Result<Option<u32>, ScreenError> {
    match number {
        None if index == 0 => Err(ScreenError::Platform(
            "main NSScreen has no NSScreenNumber".into(),
        )),
        number => Ok(number),
    }
}

/// Translates one Core Graphics notification into at most one event.
extern "C" fn reconfiguration_callback(
    display: CGDirectDisplayID,
    flags: u32,
    user_info: *mut c_void,
) {
    let Some(ctx) = NonNull::new(user_info.cast::<WatchContext>()) else {
        return;
    };
    // SAFETY: `user_info` is the live context registered in `watch`; it is
    // only freed after the callback is removed.
    let ctx = unsafe { ctx.as_ref() };

    let flags = ChangeSummaryFlags(flags);
    let Some(kind) = ReconfigurationKind::classify(flags) else {
        return;
    };
    let id = DisplayId(display);
    let event = match kind {
        ReconfigurationKind::Removed => DisplayEvent::Removed(id),
        ReconfigurationKind::Added => DisplayEvent::Added(record_for_added(display)),
        ReconfigurationKind::Moved => DisplayEvent::Moved {
            id,
            bounds: cg_bounds(display),
            set_main: flags.set_main(),
        },
    };
    debug!(?kind, %id, "display reconfiguration");
    if ctx.events.send(event).is_err() {
        debug!("display event receiver dropped");
    }
}

fn cg_bounds(display: CGDirectDisplayID) -> Area {
    let rect = CGDisplay::new(display).bounds();
    Area::from_frame(rect.origin.x, rect.origin.y, rect.size.width, rect.size.height)
}

/// Geometry from Core Graphics, scale and depth from the matching NSScreen.
#[allow(unused_unsafe)]
fn record_for_added(display: CGDirectDisplayID) -> ScreenRecord {
    let id = DisplayId(display);
    let bounds = cg_bounds(display);
    match MainThreadMarker::new().and_then(|mtm| find_screen(mtm, display)) {
        Some(screen) => ScreenRecord {
            id,
            bounds,
            content_scale: unsafe { screen.backingScaleFactor() } as f32,
            bits_per_pixel: bits_per_pixel(&screen),
            supported_resolutions: Vec::new(),
        },
        None => {
            error!(%id, "no NSScreen for added display; assuming 1x scale and 24 bpp");
            ScreenRecord::with_default_metrics(id, bounds)
        }
    }
}

fn find_screen(mtm: MainThreadMarker, display: CGDirectDisplayID) -> Option<Retained<NSScreen>> {
    NSScreen::screens(mtm)
        .iter()
        .find(|screen| screen_number(screen) == Some(display))
}

/// `deviceDescription[@"NSScreenNumber"]`, which is the screen's
/// `CGDirectDisplayID`.
#[allow(unused_unsafe)]
fn screen_number(screen: &NSScreen) -> Option<u32> {
    let description = unsafe { screen.deviceDescription() };
    let key = NSString::from_str("NSScreenNumber");
    let number: Option<Retained<NSNumber>> =
        unsafe { msg_send![&*description, objectForKey: &*key] };
    number.map(|n| n.unsignedIntValue())
}

#[allow(unused_unsafe)]
fn bits_per_pixel(screen: &NSScreen) -> u32 {
    let depth = unsafe { screen.depth() };
    let bits = unsafe { NSBitsPerPixelFromDepth(depth) };
    u32::try_from(bits).unwrap_or(easel_core::DEFAULT_BITS_PER_PIXEL)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    /// A dropped receiver must not make the callback panic across the FFI
    /// boundary.
    #[test]
    fn test_callback_tolerates_closed_channel() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut ctx = WatchContext { events: tx };

        reconfiguration_callback(
            7,
            ChangeSummaryFlags::REMOVE,
            (&mut ctx as *mut WatchContext).cast(),
        );
    }

    #[test]
    fn test_callback_ignores_null_context_and_unrelated_flags() {
        let (tx, rx) = mpsc::channel();
        let mut ctx = WatchContext { events: tx };

        reconfiguration_callback(7, ChangeSummaryFlags::REMOVE, std::ptr::null_mut());
        reconfiguration_callback(
            7,
            ChangeSummaryFlags::BEGIN_CONFIGURATION,
            (&mut ctx as *mut WatchContext).cast(),
        );

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_main_screen_without_number_fails_enumeration() {
        assert!(matches!(screen_id(0, None), Err(ScreenError::Platform(_))));
    }

    #[test]
    fn test_secondary_screen_without_number_is_skipped() {
        assert!(matches!(screen_id(2, None), Ok(None)));
        assert!(matches!(screen_id(0, Some(69733378)), Ok(Some(69733378))));
    }

    #[test]
    fn test_callback_sends_removal() {
        // Arrange
        let (tx, rx) = mpsc::channel();
        let mut ctx = WatchContext { events: tx };

        // Act
        reconfiguration_callback(
            7,
            ChangeSummaryFlags::REMOVE | ChangeSummaryFlags::MOVED,
            (&mut ctx as *mut WatchContext).cast(),
        );

        // Assert
        assert_eq!(rx.try_recv().expect("event"), DisplayEvent::Removed(DisplayId(7)));
    }
}
