//! AppKit file panels.
//!
//! Each call builds a fresh `NSOpenPanel` / `NSSavePanel` and runs it
//! modally.  Only constructible with a [`MainThreadMarker`], since AppKit
//! panels are main-thread objects.

use std::path::{Path, PathBuf};

use easel_core::{FolderRequest, OpenFileRequest, SaveFileRequest};
use objc2::rc::Retained;
use objc2::MainThreadMarker;
use objc2_app_kit::{
    NSApplication, NSApplicationActivationPolicy, NSModalResponse, NSOpenPanel, NSSavePanel,
};
use objc2_foundation::{NSArray, NSString, NSURL};
use tracing::debug;

use crate::application::dialogs::{DialogError, FileDialogs};

/// `NSModalResponseOK`.
const MODAL_RESPONSE_OK: NSModalResponse = 1;

/// `FileDialogs` backed by `NSOpenPanel` and `NSSavePanel`.
#[derive(Debug, Clone, Copy)]
pub struct CocoaFileDialogs {
    mtm: MainThreadMarker,
}

impl CocoaFileDialogs {
    pub fn new(mtm: MainThreadMarker) -> Self {
        Self { mtm }
    }

    /// A process without an activation policy cannot bring a panel to the
    /// front, which happens for command-line hosts.
    #[allow(unused_unsafe)]
    fn ensure_application(&self) {
        let app = NSApplication::sharedApplication(self.mtm);
        if unsafe { app.activationPolicy() } == NSApplicationActivationPolicy::Prohibited {
            debug!("promoting process to accessory application for file panels");
            unsafe { app.setActivationPolicy(NSApplicationActivationPolicy::Accessory) };
        }
    }

    #[allow(unused_unsafe, deprecated)]
    fn run_open_panel(
        &self,
        choose_files: bool,
        initial_path: Option<&Path>,
        extensions: &[String],
    ) -> Result<Option<PathBuf>, DialogError> {
        self.ensure_application();
        let panel = unsafe { NSOpenPanel::openPanel(self.mtm) };
        unsafe {
            panel.setCanChooseFiles(choose_files);
            panel.setCanChooseDirectories(!choose_files);
            panel.setAllowsMultipleSelection(false);
            if let Some(types) = file_types(extensions) {
                panel.setAllowedFileTypes(Some(&*types));
            }
            if let Some(dir) = initial_path {
                panel.setDirectoryURL(Some(&*file_url(dir)));
            }
        }

        if unsafe { panel.runModal() } != MODAL_RESPONSE_OK {
            return Ok(None);
        }
        let url = unsafe { panel.URLs() }.firstObject();
        url_to_path(url)
    }
}

impl FileDialogs for CocoaFileDialogs {
    fn open_file(&self, request: &OpenFileRequest) -> Result<Option<PathBuf>, DialogError> {
        self.run_open_panel(true, request.initial_path.as_deref(), &request.extensions)
    }

    fn choose_folder(&self, request: &FolderRequest) -> Result<Option<PathBuf>, DialogError> {
        self.run_open_panel(false, request.initial_path.as_deref(), &[])
    }

    #[allow(unused_unsafe, deprecated)]
    fn save_file(&self, request: &SaveFileRequest) -> Result<Option<PathBuf>, DialogError> {
        self.ensure_application();
        let panel = unsafe { NSSavePanel::savePanel(self.mtm) };
        unsafe {
            if let Some(types) = file_types(&request.extensions) {
                panel.setAllowedFileTypes(Some(&*types));
            }
            if let Some(dir) = &request.directory {
                panel.setDirectoryURL(Some(&*file_url(dir)));
            }
            if let Some(name) = &request.file_name {
                panel.setNameFieldStringValue(&NSString::from_str(&name.to_string_lossy()));
            }
        }

        if unsafe { panel.runModal() } != MODAL_RESPONSE_OK {
            return Ok(None);
        }
        url_to_path(unsafe { panel.URL() })
    }
}

#[allow(unused_unsafe)]
fn file_url(path: &Path) -> Retained<NSURL> {
    let path = NSString::from_str(&path.to_string_lossy());
    unsafe { NSURL::fileURLWithPath(&path) }
}

fn file_types(extensions: &[String]) -> Option<Retained<NSArray<NSString>>> {
    if extensions.is_empty() {
        return None;
    }
    let types: Vec<Retained<NSString>> = extensions.iter().map(|e| NSString::from_str(e)).collect();
    Some(NSArray::from_retained_slice(&types))
}

/// A confirmed panel that yields no URL is reported as
/// [`DialogError::EmptyResult`], distinct from a cancel.
#[allow(unused_unsafe)]
fn url_to_path(url: Option<Retained<NSURL>>) -> Result<Option<PathBuf>, DialogError> {
    let path = url.and_then(|u| unsafe { u.path() });
    match path {
        Some(p) if p.length() > 0 => Ok(Some(PathBuf::from(p.to_string()))),
        _ => Err(DialogError::EmptyResult),
    }
}
