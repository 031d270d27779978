//! Platform: the facade the framework talks to.
//!
//! Owns one of each service and forwards the framework's platform calls to
//! them.  A `Platform` lives on the main thread for the life of the app;
//! `infrastructure::native_platform` builds one wired to the native
//! adapters.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use easel_core::{DisplayObserver, DisplayRef, ResourceError};
use tracing::debug;

use super::dialogs::DialogService;
use super::displays::DisplayService;
use super::resources::{DataSource, ResourceService};

/// Resource lookup, file dialogs, and display tracking for one application.
pub struct Platform {
    resources: ResourceService,
    dialogs: DialogService,
    displays: DisplayService,
}

impl Platform {
    pub fn new(
        resources: ResourceService,
        dialogs: DialogService,
        displays: DisplayService,
    ) -> Self {
        Self {
            resources,
            dialogs,
            displays,
        }
    }

    /// Launch-time setup: registers the asset directory.
    pub fn prepare_launch(&mut self) -> Option<PathBuf> {
        debug!("preparing launch");
        self.resources.prepare_asset_loading()
    }

    /// Connects the application object that receives display
    /// notifications.
    pub fn set_display_observer(&mut self, observer: Arc<dyn DisplayObserver>) {
        self.displays.set_observer(observer);
    }

    pub fn resources(&self) -> &ResourceService {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceService {
        &mut self.resources
    }

    pub fn dialogs(&self) -> &DialogService {
        &self.dialogs
    }

    pub fn display_service(&self) -> &DisplayService {
        &self.displays
    }

    pub fn display_service_mut(&mut self) -> &mut DisplayService {
        &mut self.displays
    }

    // ── Forwarders ────────────────────────────────────────────────────────────

    pub fn resource_path(&self, relative: &Path) -> PathBuf {
        self.resources.resource_path(relative)
    }

    pub fn resource_root(&self) -> PathBuf {
        self.resources.resource_root()
    }

    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the resource cannot be located.
    pub fn load_resource(&self, relative: &Path) -> Result<DataSource, ResourceError> {
        self.resources.load_resource(relative)
    }

    pub fn open_file_path<S: AsRef<str>>(
        &self,
        initial_path: &Path,
        extensions: &[S],
    ) -> Option<PathBuf> {
        self.dialogs.open_file_path(initial_path, extensions)
    }

    pub fn folder_path(&self, initial_path: &Path) -> Option<PathBuf> {
        self.dialogs.folder_path(initial_path)
    }

    pub fn save_file_path<S: AsRef<str>>(
        &self,
        initial_path: &Path,
        extensions: &[S],
    ) -> Option<PathBuf> {
        self.dialogs.save_file_path(initial_path, extensions)
    }

    pub fn displays(&mut self, force_refresh: bool) -> &[DisplayRef] {
        self.displays.displays(force_refresh)
    }

    /// Applies queued display reconfiguration events.  Call from the main
    /// loop after the native run loop has had a chance to deliver them.
    pub fn pump_display_events(&mut self) -> usize {
        self.displays.pump_events()
    }
}
