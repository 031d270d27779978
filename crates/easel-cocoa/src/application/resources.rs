//! ResourceService: bundle resource lookup and asset directory registration.
//!
//! # Bundle resolution
//!
//! The service talks to the application bundle through [`ResourceBundle`].
//! A host may install a bundle explicitly with
//! [`ResourceService::set_bundle`]; otherwise the system default (the main
//! bundle on Apple platforms) is created the first time a lookup needs it
//! and kept for the rest of the process.
//!
//! # Failure policy
//!
//! A lookup that finds nothing returns an empty `PathBuf`.  Only
//! [`ResourceService::load_resource`] escalates, with
//! [`ResourceError::NotFound`], because its caller is about to read the
//! file.

use std::cell::OnceCell;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use easel_core::domain::resource::DEFAULT_ASSETS_DIR_NAME;
use easel_core::{
    asset_directory_candidates, select_asset_directory, split_resource_path, ResourceError,
    ResourceQuery,
};
use tracing::{debug, info, warn};

/// Read-only view of an application bundle.
#[cfg_attr(test, mockall::automock)]
pub trait ResourceBundle {
    /// Full path of the named resource, or `None` if the bundle lacks it.
    fn path_for_resource(&self, query: &ResourceQuery) -> Option<PathBuf>;

    /// The bundle's resource directory.
    fn resource_root(&self) -> Option<PathBuf>;

    /// The directory that contains the application itself (the parent of
    /// the `.app` bundle).
    fn application_dir(&self) -> Option<PathBuf>;
}

/// Factory for the bundle used when none was installed.
pub type BundleFactory = fn() -> Box<dyn ResourceBundle>;

/// A located resource, ready to be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    path: PathBuf,
}

impl DataSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens the resource for reading.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Io`] if the file cannot be opened.
    pub fn open(&self) -> Result<File, ResourceError> {
        File::open(&self.path).map_err(|source| ResourceError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Reads the whole resource into memory.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Io`] on open or read failure.
    pub fn read_to_vec(&self) -> Result<Vec<u8>, ResourceError> {
        let mut buf = Vec::new();
        self.open()?
            .read_to_end(&mut buf)
            .map_err(|source| ResourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(buf)
    }
}

/// Resource lookup against the application bundle.
pub struct ResourceService {
    bundle: OnceCell<Box<dyn ResourceBundle>>,
    default_bundle: BundleFactory,
    assets_dir_name: String,
    asset_directories: Vec<PathBuf>,
}

impl ResourceService {
    /// Creates a service whose bundle, unless one is installed, comes from
    /// `default_bundle` on first use.
    pub fn new(default_bundle: BundleFactory) -> Self {
        Self {
            bundle: OnceCell::new(),
            default_bundle,
            assets_dir_name: DEFAULT_ASSETS_DIR_NAME.to_string(),
            asset_directories: Vec::new(),
        }
    }

    /// Overrides the name of the asset directory searched by
    /// [`prepare_asset_loading`](Self::prepare_asset_loading).
    pub fn set_assets_dir_name(&mut self, name: impl Into<String>) {
        self.assets_dir_name = name.into();
    }

    /// Installs the bundle used for all subsequent lookups.
    pub fn set_bundle(&mut self, bundle: Box<dyn ResourceBundle>) {
        self.bundle = OnceCell::from(bundle);
    }

    /// The current bundle, creating the default one on first use.
    pub fn bundle(&self) -> &dyn ResourceBundle {
        self.bundle
            .get_or_init(|| {
                debug!("no bundle installed; using the platform default");
                (self.default_bundle)()
            })
            .as_ref()
    }

    /// Resolves a path relative to the resource directory.
    ///
    /// Returns an empty path if the file name is empty (the bundle is not
    /// consulted) or if the bundle has no such resource.
    pub fn resource_path(&self, relative: &Path) -> PathBuf {
        let Some(query) = split_resource_path(relative) else {
            return PathBuf::new();
        };
        match self.bundle().path_for_resource(&query) {
            Some(path) => path,
            None => {
                debug!(resource = %relative.display(), "resource not found in bundle");
                PathBuf::new()
            }
        }
    }

    /// The bundle's resource directory, or an empty path if the bundle
    /// reports none.
    pub fn resource_root(&self) -> PathBuf {
        self.bundle().resource_root().unwrap_or_else(|| {
            warn!("bundle has no resource directory");
            PathBuf::new()
        })
    }

    /// Locates a resource and returns a handle to it.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the resource cannot be located.
    pub fn load_resource(&self, relative: &Path) -> Result<DataSource, ResourceError> {
        let full = self.resource_path(relative);
        if full.as_os_str().is_empty() {
            return Err(ResourceError::NotFound(relative.to_path_buf()));
        }
        Ok(DataSource::new(full))
    }

    /// Registers the asset directory.
    ///
    /// Looks for `<resource root>/assets` first, then `assets` beside the
    /// application, and registers whichever exists first.  Returns the
    /// registered directory.
    pub fn prepare_asset_loading(&mut self) -> Option<PathBuf> {
        let root = self.resource_root();
        let app_dir = self
            .bundle()
            .application_dir()
            .or_else(executable_dir)
            .unwrap_or_default();
        let candidates = asset_directory_candidates(&root, &app_dir, &self.assets_dir_name);

        match select_asset_directory(&candidates, Path::is_dir) {
            Some(dir) => {
                info!(dir = %dir.display(), "asset directory registered");
                self.add_asset_directory(dir.clone());
                Some(dir)
            }
            None => {
                debug!(?candidates, "no asset directory found");
                None
            }
        }
    }

    /// Adds a directory to the asset search list, ignoring duplicates.
    pub fn add_asset_directory(&mut self, dir: PathBuf) {
        if !self.asset_directories.contains(&dir) {
            self.asset_directories.push(dir);
        }
    }

    pub fn asset_directories(&self) -> &[PathBuf] {
        &self.asset_directories
    }

    /// Finds `relative` in the registered asset directories, in order.
    pub fn asset_path(&self, relative: &Path) -> Option<PathBuf> {
        self.asset_directories
            .iter()
            .map(|dir| dir.join(relative))
            .find(|candidate| candidate.exists())
    }
}

fn executable_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
