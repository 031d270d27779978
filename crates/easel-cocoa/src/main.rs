//! `easel-probe`: exercises the platform services from the command line.
//!
//! # Usage
//!
//! ```text
//! easel-probe [--config <PATH>] [--log-level <FILTER>] <COMMAND>
//!
//! Commands:
//!   displays     List connected displays (main first)
//!   resource     Resolve a bundle resource path
//!   open         Show an open-file panel
//!   folder       Show a choose-folder panel
//!   save         Show a save panel
//!   watch        Log display hot-plug events
//!   resolution   Switch a display to its closest supported mode
//! ```
//!
//! Log output goes to stderr; command results go to stdout.  `RUST_LOG`
//! takes precedence over both `--log-level` and the config file.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use easel_cocoa::infrastructure::storage::config::{
    load_config, load_config_from, PlatformConfig,
};
use easel_cocoa::infrastructure::{native_platform, run_loop};
use easel_cocoa::Platform;
use easel_core::{DisplayId, DisplayObserver, DisplayRef, Resolution};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

// ── CLI argument definitions ──────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name = "easel-probe",
    about = "Query bundle resources, file panels, and displays through the Easel platform layer",
    version
)]
struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, env = "EASEL_CONFIG")]
    config: Option<PathBuf>,

    /// `tracing` filter overriding the configured log level.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List connected displays, main display first.
    Displays {
        /// Re-enumerate even if the list is already cached.
        #[arg(long)]
        refresh: bool,
    },
    /// Resolve a path relative to the bundle's resources.
    Resource {
        path: PathBuf,
        /// Also read the file and report its size.
        #[arg(long)]
        read: bool,
    },
    /// Show an open-file panel.
    Open {
        #[arg(long, default_value = "")]
        initial: PathBuf,
        /// Allowed extension; repeat for several.
        #[arg(long = "ext")]
        extensions: Vec<String>,
    },
    /// Show a choose-folder panel.
    Folder {
        #[arg(long, default_value = "")]
        initial: PathBuf,
    },
    /// Show a save panel.
    Save {
        /// A directory, or a file path whose name pre-fills the panel.
        #[arg(long, default_value = "")]
        initial: PathBuf,
        #[arg(long = "ext")]
        extensions: Vec<String>,
    },
    /// Log display connect, disconnect, and move events.
    Watch {
        /// Stop after this many seconds; runs until interrupted if omitted.
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// Switch a display to the supported mode closest to WIDTHxHEIGHT.
    Resolution {
        /// Display id as printed by `displays`.
        #[arg(long)]
        display: u32,
        #[arg(long)]
        width: i32,
        #[arg(long)]
        height: i32,
    },
}

// ── Observer ──────────────────────────────────────────────────────────────────

struct LoggingObserver;

impl DisplayObserver for LoggingObserver {
    fn display_connected(&self, display: &DisplayRef) {
        let (id, bounds) = (display.id(), display.bounds());
        info!(%id, ?bounds, "display connected");
    }

    fn display_disconnected(&self, display: &DisplayRef) {
        let id = display.id();
        info!(%id, "display disconnected");
    }

    fn display_changed(&self, display: &DisplayRef) {
        let (id, bounds) = (display.id(), display.bounds());
        info!(%id, ?bounds, "display changed");
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => load_config().unwrap_or_else(|e| {
            eprintln!("easel-probe: {e}; using default configuration");
            PlatformConfig::default()
        }),
    };

    let level = cli.log_level.clone().unwrap_or_else(|| config.logging.level.clone());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
    debug!(?config, "configuration loaded");

    let mut platform = native_platform(&config);
    if let Some(dir) = platform.prepare_launch() {
        debug!(dir = %dir.display(), "asset directory registered");
    }

    match cli.command {
        Command::Displays { refresh } => print_displays(platform.displays(refresh)),
        Command::Resource { path, read } => {
            println!("root: {}", platform.resource_root().display());
            let resolved = platform.resource_path(&path);
            if resolved.as_os_str().is_empty() {
                anyhow::bail!("resource not found: {}", path.display());
            }
            println!("path: {}", resolved.display());
            if read {
                let bytes = platform
                    .load_resource(&path)?
                    .read_to_vec()
                    .with_context(|| format!("reading {}", resolved.display()))?;
                println!("size: {} bytes", bytes.len());
            }
        }
        Command::Open { initial, extensions } => {
            print_choice(platform.open_file_path(&initial, extensions.as_slice()));
        }
        Command::Folder { initial } => print_choice(platform.folder_path(&initial)),
        Command::Save { initial, extensions } => {
            print_choice(platform.save_file_path(&initial, extensions.as_slice()));
        }
        Command::Watch { seconds } => {
            watch(&mut platform, config.displays.poll_interval(), seconds);
        }
        Command::Resolution {
            display,
            width,
            height,
        } => {
            platform.displays(false);
            let target = platform
                .display_service()
                .find(DisplayId(display))
                .with_context(|| format!("no display with id {display}"))?;
            match platform
                .display_service()
                .set_resolution(&target, Resolution::new(width, height))
            {
                Some(applied) => println!("{}: {applied}", target.id()),
                None => anyhow::bail!("could not change the mode of {}", target.id()),
            }
        }
    }

    Ok(())
}

fn print_displays(displays: &[DisplayRef]) {
    for (index, display) in displays.iter().enumerate() {
        let bounds = display.bounds();
        let role = if index == 0 { " (main)" } else { "" };
        println!(
            "{}{role}: {} at ({}, {}), scale {}, {} bpp",
            display.id(),
            display.size(),
            bounds.x1,
            bounds.y1,
            display.content_scale(),
            display.bits_per_pixel(),
        );
        let modes = display.supported_resolutions();
        if !modes.is_empty() {
            let modes: Vec<String> = modes.iter().map(ToString::to_string).collect();
            println!("    modes: {}", modes.join(", "));
        }
    }
}

fn print_choice(choice: Option<PathBuf>) {
    match choice {
        Some(path) => println!("{}", path.display()),
        None => println!("(cancelled)"),
    }
}

fn watch(platform: &mut Platform, poll_interval: Duration, seconds: Option<u64>) {
    platform.set_display_observer(Arc::new(LoggingObserver));
    let count = platform.displays(false).len();
    info!(count, "watching displays");
    if count == 0 {
        warn!("no displays enumerated");
    }

    let deadline = seconds.map(|s| Instant::now() + Duration::from_secs(s));
    while deadline.map_or(true, |d| Instant::now() < d) {
        run_loop::run_for(poll_interval);
        let applied = platform.pump_display_events();
        if applied > 0 {
            debug!(applied, "display events applied");
        }
    }
}
