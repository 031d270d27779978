//! Application layer for the platform services.
//!
//! - **`resources`** – bundle resource lookup, resource loading, and asset
//!   directory registration.  The bundle is reached through the
//!   `ResourceBundle` trait.
//!
//! - **`dialogs`** – open / folder / save panels behind the `FileDialogs`
//!   trait.  Cancellation and backend failures both come back as `None`.
//!
//! - **`displays`** – display enumeration, hot-plug event pumping, and
//!   touch-screen resolution changes behind the `ScreenSource` trait.
//!
//! - **`platform`** – the facade that owns all three services.

pub mod dialogs;
pub mod displays;
pub mod platform;
pub mod resources;
