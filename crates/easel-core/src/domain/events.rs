//! Display reconfiguration events.
//!
//! macOS reports display changes through
//! `CGDisplayRegisterReconfigurationCallback`: one call per display per
//! change, with a `CGDisplayChangeSummaryFlags` bit set.  The adapter does
//! not touch the registry from inside that callback.  It classifies the
//! flags, captures whatever geometry the change needs, and queues a
//! [`DisplayEvent`] that the owning thread later applies with
//! [`DisplayRegistry::apply`](super::registry::DisplayRegistry::apply).

use super::display::{Area, DisplayId, ScreenRecord};

/// Core Graphics `CGDisplayChangeSummaryFlags`.
///
/// Bit values match `<CoreGraphics/CGDisplayConfiguration.h>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeSummaryFlags(pub u32);

impl ChangeSummaryFlags {
    pub const BEGIN_CONFIGURATION: u32 = 1 << 0;
    pub const MOVED: u32 = 1 << 1;
    pub const SET_MAIN: u32 = 1 << 2;
    pub const SET_MODE: u32 = 1 << 3;
    pub const ADD: u32 = 1 << 4;
    pub const REMOVE: u32 = 1 << 5;
    pub const ENABLED: u32 = 1 << 8;
    pub const DISABLED: u32 = 1 << 9;
    pub const MIRROR: u32 = 1 << 10;
    pub const UNMIRROR: u32 = 1 << 11;
    pub const DESKTOP_SHAPE_CHANGED: u32 = 1 << 12;

    pub fn contains(&self, bits: u32) -> bool {
        self.0 & bits == bits
    }

    /// Returns `true` if the display became the main display.
    pub fn set_main(&self) -> bool {
        self.contains(Self::SET_MAIN)
    }
}

/// The one change the registry acts on for a given flag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconfigurationKind {
    Removed,
    Added,
    Moved,
}

impl ReconfigurationKind {
    /// Picks the change to act on.
    ///
    /// Remove wins over add, and add wins over moved: an added display is
    /// often reported with the moved bit set as well.  Flag sets carrying
    /// none of the three (begin-configuration, mode-only, mirroring) are
    /// ignored.
    pub fn classify(flags: ChangeSummaryFlags) -> Option<Self> {
        if flags.contains(ChangeSummaryFlags::REMOVE) {
            Some(Self::Removed)
        } else if flags.contains(ChangeSummaryFlags::ADD) {
            Some(Self::Added)
        } else if flags.contains(ChangeSummaryFlags::MOVED) {
            Some(Self::Moved)
        } else {
            None
        }
    }
}

/// An inbound reconfiguration event for the display registry.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayEvent {
    /// A display was connected; the record describes it.
    Added(ScreenRecord),
    /// A display was disconnected.
    Removed(DisplayId),
    /// A display's geometry or main-display role changed.
    Moved {
        id: DisplayId,
        /// New bounds as reported by the OS.
        bounds: Area,
        /// `true` if the display was designated the main display.
        set_main: bool,
    },
}

impl DisplayEvent {
    pub fn display_id(&self) -> DisplayId {
        match self {
            DisplayEvent::Added(record) => record.id,
            DisplayEvent::Removed(id) => *id,
            DisplayEvent::Moved { id, .. } => *id,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
