//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads and writes the TOML file that tunes the
//! platform services (log level, bundle override, asset directory name,
//! display watching).  A missing file means defaults.

pub mod config;
