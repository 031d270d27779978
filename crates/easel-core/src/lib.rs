//! # easel-core
//!
//! Platform-independent half of the Easel platform services: the display
//! records and registry, the reconfiguration events delivered by the OS,
//! resolution matching for touch screens, and the path logic behind bundle
//! resource lookup and native file dialogs.
//!
//! This crate has zero dependencies on OS APIs.  The Cocoa and UIKit
//! adapters live in `easel-cocoa`; they translate native screen lists and
//! callbacks into the types defined here and feed them to a
//! [`DisplayRegistry`] on a single thread.
//!
//! # Modules
//!
//! - **`domain::display`** – `Display`, `Area`, `Resolution`, `ScreenRecord`.
//! - **`domain::events`** – Core Graphics change-summary flags and the
//!   `DisplayEvent` enum the registry consumes.
//! - **`domain::registry`** – the tracked display collection (main display
//!   first) and the observer notifications.
//! - **`domain::resolution`** – closest supported mode search.
//! - **`domain::resource`** – resource-path splitting and asset directory
//!   selection.
//! - **`domain::dialog`** – dialog requests, tilde expansion, and the save
//!   location split.

pub mod domain;

pub use domain::dialog::{
    expand_tilde, normalize_extensions, split_save_location, FolderRequest, OpenFileRequest,
    PathKind, SaveFileRequest,
};
pub use domain::display::{
    Area, Display, DisplayId, DisplayRef, Resolution, ScreenRecord, DEFAULT_BITS_PER_PIXEL,
    DEFAULT_CONTENT_SCALE,
};
pub use domain::events::{ChangeSummaryFlags, DisplayEvent, ReconfigurationKind};
pub use domain::registry::{DisplayObserver, DisplayRegistry};
pub use domain::resolution::closest_resolution_index;
pub use domain::resource::{
    asset_directory_candidates, select_asset_directory, split_resource_path, ResourceError,
    ResourceQuery,
};
