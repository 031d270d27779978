//! Display records and the geometry they carry.
//!
//! All displays share one coordinate space: the origin is the top-left
//! corner of the main display and Y grows downward.  AppKit reports screen
//! frames with the origin at the *bottom*-left of the main display and Y
//! growing upward, so the macOS adapter converts frames with
//! [`Area::from_bottom_left_frame`] before they reach the registry.

use std::sync::{Arc, PoisonError, RwLock};

/// Bits per pixel assumed when the OS cannot describe a screen's depth.
pub const DEFAULT_BITS_PER_PIXEL: u32 = 24;

/// Content scale assumed when the OS cannot describe a screen's backing scale.
pub const DEFAULT_CONTENT_SCALE: f32 = 1.0;

/// Shared handle to a tracked display.
///
/// The registry owns the collection; the rest of the framework (windows,
/// observers) hold clones of the same `Arc`, so a reconfiguration that
/// updates the bounds in place is visible everywhere.
pub type DisplayRef = Arc<Display>;

/// OS identifier of a display.
///
/// On macOS this is the `CGDirectDisplayID`; on iOS it is the index of the
/// `UIScreen` in `[UIScreen screens]` at enumeration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayId(pub u32);

impl std::fmt::Display for DisplayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "display#{}", self.0)
    }
}

/// An integer rectangle: `(x1, y1)` inclusive, `(x2, y2)` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Area {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Area {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Builds an area from an origin and size expressed in points.
    ///
    /// Fractional coordinates are truncated toward zero.
    pub fn from_frame(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x1: x as i32,
            y1: y as i32,
            x2: (x + width) as i32,
            y2: (y + height) as i32,
        }
    }

    /// Converts a frame whose origin is the lower-left corner of the main
    /// display (Y up) into the shared top-left coordinate space (Y down).
    pub fn from_bottom_left_frame(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        main_height: i32,
    ) -> Self {
        let main_height = f64::from(main_height);
        Self {
            x1: x as i32,
            y1: (main_height - y - height) as i32,
            x2: (x + width) as i32,
            y2: (main_height - y) as i32,
        }
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    pub fn size(&self) -> Resolution {
        Resolution::new(self.width(), self.height())
    }

    /// Returns `true` if the point lies inside the area.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }
}

/// A pixel resolution, `width × height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Resolution {
    pub width: i32,
    pub height: i32,
}

impl Resolution {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Euclidean distance between two resolutions treated as 2-D points.
    ///
    /// Computed in `f64` so differences spanning the whole `i32` range
    /// neither overflow nor lose integer precision.
    pub fn distance_to(&self, other: &Resolution) -> f64 {
        let dx = f64::from(self.width) - f64::from(other.width);
        let dy = f64::from(self.height) - f64::from(other.height);
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Everything the OS reports about one screen.
///
/// Produced by the platform screen sources and consumed by the registry,
/// either in bulk (enumeration) or one at a time (hot-plug "add").
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenRecord {
    pub id: DisplayId,
    /// Bounds in the shared top-left coordinate space.
    pub bounds: Area,
    /// Backing scale factor (2.0 on Retina panels).
    pub content_scale: f32,
    pub bits_per_pixel: u32,
    /// Modes the screen can be switched to.  Empty on macOS.
    pub supported_resolutions: Vec<Resolution>,
}

impl ScreenRecord {
    /// A record with the fallback scale and depth used when the native
    /// screen object cannot be found.
    pub fn with_default_metrics(id: DisplayId, bounds: Area) -> Self {
        Self {
            id,
            bounds,
            content_scale: DEFAULT_CONTENT_SCALE,
            bits_per_pixel: DEFAULT_BITS_PER_PIXEL,
            supported_resolutions: Vec::new(),
        }
    }
}

/// A monitor or screen tracked by the registry.
///
/// Only the bounds change after construction: a "moved" reconfiguration
/// rewrites them in place.  Depth, scale, and modes are fixed for the
/// lifetime of the record; a mode switch that changes them arrives from the
/// OS as a remove followed by an add.
#[derive(Debug)]
pub struct Display {
    id: DisplayId,
    bounds: RwLock<Area>,
    bits_per_pixel: u32,
    content_scale: f32,
    supported_resolutions: Vec<Resolution>,
}

impl Display {
    pub fn from_record(record: ScreenRecord) -> Self {
        Self {
            id: record.id,
            bounds: RwLock::new(record.bounds),
            bits_per_pixel: record.bits_per_pixel,
            content_scale: record.content_scale,
            supported_resolutions: record.supported_resolutions,
        }
    }

    pub fn id(&self) -> DisplayId {
        self.id
    }

    pub fn bounds(&self) -> Area {
        *self.bounds.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the bounds, returning `true` if they differed.
    pub fn set_bounds(&self, bounds: Area) -> bool {
        let mut guard = self.bounds.write().unwrap_or_else(PoisonError::into_inner);
        if *guard == bounds {
            return false;
        }
        *guard = bounds;
        true
    }

    pub fn width(&self) -> i32 {
        self.bounds().width()
    }

    pub fn height(&self) -> i32 {
        self.bounds().height()
    }

    pub fn size(&self) -> Resolution {
        self.bounds().size()
    }

    pub fn bits_per_pixel(&self) -> u32 {
        self.bits_per_pixel
    }

    pub fn content_scale(&self) -> f32 {
        self.content_scale
    }

    pub fn supported_resolutions(&self) -> &[Resolution] {
        &self.supported_resolutions
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        self.bounds().contains(x, y)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_from_frame_truncates_to_integer_corners() {
        let area = Area::from_frame(10.7, 20.2, 100.0, 50.0);
        assert_eq!(area, Area::new(10, 20, 110, 70));
    }

    #[test]
    fn test_bottom_left_frame_above_main_display_gets_negative_y() {
        // Arrange: 1920x1080 main, 1280x1024 secondary sitting on top of it.
        // AppKit reports the secondary's origin at y = 1080.
        let main_height = 1080;

        // Act
        let area = Area::from_bottom_left_frame(0.0, 1080.0, 1280.0, 1024.0, main_height);

        // Assert
        assert_eq!(area, Area::new(0, -1024, 1280, 0));
    }

    #[test]
    fn test_bottom_left_frame_below_main_display_gets_positive_y() {
        let area = Area::from_bottom_left_frame(1920.0, -900.0, 1600.0, 900.0, 1080);
        assert_eq!(area, Area::new(1920, 1080, 3520, 1980));
    }

    #[test]
    fn test_bottom_left_frame_of_main_display_is_unchanged() {
        let area = Area::from_bottom_left_frame(0.0, 0.0, 1920.0, 1080.0, 1080);
        assert_eq!(area, Area::from_frame(0.0, 0.0, 1920.0, 1080.0));
    }

    #[test]
    fn test_area_contains_excludes_far_edges() {
        let area = Area::new(0, 0, 100, 100);
        assert!(area.contains(0, 0));
        assert!(area.contains(99, 99));
        assert!(!area.contains(100, 50));
        assert!(!area.contains(50, -1));
    }

    #[test]
    fn test_resolution_distance_is_euclidean() {
        let a = Resolution::new(0, 0);
        let b = Resolution::new(3, 4);
        assert!((a.distance_to(&b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resolution_distance_spans_full_i32_range() {
        // Arrange
        let low = Resolution::new(i32::MIN, 0);
        let high = Resolution::new(i32::MAX, 0);

        // Act
        let distance = low.distance_to(&high);

        // Assert
        assert!(distance.is_finite());
        assert!((distance - f64::from(u32::MAX)).abs() < 1.0);
        assert_eq!(high.distance_to(&low), distance);
    }

    #[test]
    fn test_display_set_bounds_reports_change_only_when_different() {
        // Arrange
        let display = Display::from_record(ScreenRecord::with_default_metrics(
            DisplayId(1),
            Area::new(0, 0, 1920, 1080),
        ));

        // Act / Assert
        assert!(!display.set_bounds(Area::new(0, 0, 1920, 1080)));
        assert!(display.set_bounds(Area::new(0, 0, 2560, 1440)));
        assert_eq!(display.size(), Resolution::new(2560, 1440));
    }

    #[test]
    fn test_default_metrics_use_24_bits_and_unit_scale() {
        let record = ScreenRecord::with_default_metrics(DisplayId(7), Area::default());
        assert_eq!(record.bits_per_pixel, 24);
        assert_eq!(record.content_scale, 1.0);
        assert!(record.supported_resolutions.is_empty());
    }
}
