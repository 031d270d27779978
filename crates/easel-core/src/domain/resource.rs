//! Bundle resource path handling.
//!
//! A resource is addressed by a path relative to the bundle's resource
//! directory, e.g. `shaders/blur.frag`.  The bundle API wants that split
//! into a file name and an optional subdirectory, which is what
//! [`split_resource_path`] produces.  Assets are looked up in a
//! conventional `assets` directory, first inside the bundle's resources and
//! then next to the application itself.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Conventional name of the asset directory.
pub const DEFAULT_ASSETS_DIR_NAME: &str = "assets";

/// Error type for resource loading.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The bundle has no resource at the requested relative path.
    #[error("resource not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The resource was located but could not be read.
    #[error("I/O error reading resource at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A relative resource path split the way a bundle lookup expects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceQuery {
    /// Subdirectory inside the resource directory, if any.
    pub subdirectory: Option<PathBuf>,
    /// File name, including extension.
    pub file_name: OsString,
}

/// Splits `relative` into a subdirectory and a file name.
///
/// Returns `None` when the path has no file name (empty path, `..`, a bare
/// root); callers treat that as "not found" without asking the bundle.
pub fn split_resource_path(relative: &Path) -> Option<ResourceQuery> {
    let file_name = relative.file_name()?.to_os_string();
    let subdirectory = relative
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty() && *parent != relative)
        .map(Path::to_path_buf);
    Some(ResourceQuery {
        subdirectory,
        file_name,
    })
}

/// The asset directories to try, in order: inside the resource root, then
/// inside the directory that contains the application.
pub fn asset_directory_candidates(
    resource_root: &Path,
    application_dir: &Path,
    dir_name: &str,
) -> [PathBuf; 2] {
    [resource_root.join(dir_name), application_dir.join(dir_name)]
}

/// Returns the first candidate for which `is_dir` holds.
pub fn select_asset_directory<F>(candidates: &[PathBuf], is_dir: F) -> Option<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    candidates.iter().find(|c| is_dir(c)).cloned()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
