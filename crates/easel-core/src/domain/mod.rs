//! Domain entities for the Easel platform services.
//!
//! Everything in here is pure: no AppKit, UIKit, Core Graphics, or
//! filesystem calls beyond what a caller passes in.  The infrastructure
//! layer in `easel-cocoa` queries the OS and hands the results to these
//! types, which is what makes the display bookkeeping testable on any
//! machine.

/// Dialog requests and the path handling that precedes presenting a panel.
pub mod dialog;

/// Display records and geometry.
pub mod display;

/// Reconfiguration flags and inbound display events.
pub mod events;

/// The tracked display collection.
///
/// See [`registry::DisplayRegistry`] for the main type.
pub mod registry;

/// Closest supported resolution search.
pub mod resolution;

/// Bundle resource path splitting and asset directory selection.
pub mod resource;
