//! File dialog adapters.
//!
//! On macOS the panels come from AppKit and can only be shown from the main
//! thread; [`native_dialogs`] falls back to [`HeadlessFileDialogs`] when
//! called elsewhere.  iOS has no document panels in this layer and every
//! other target is headless.

use std::path::PathBuf;

use easel_core::{FolderRequest, OpenFileRequest, SaveFileRequest};

use crate::application::dialogs::{DialogError, FileDialogs};

#[cfg(target_os = "macos")]
pub mod macos;

/// The dialog backend for this target.
#[cfg(target_os = "macos")]
pub fn native_dialogs() -> Box<dyn FileDialogs> {
    match objc2::MainThreadMarker::new() {
        Some(mtm) => Box::new(macos::CocoaFileDialogs::new(mtm)),
        None => {
            tracing::warn!("not on the main thread; file dialogs disabled");
            Box::new(HeadlessFileDialogs::new("AppKit panels require the main thread"))
        }
    }
}

/// The dialog backend for this target.
#[cfg(not(target_os = "macos"))]
pub fn native_dialogs() -> Box<dyn FileDialogs> {
    Box::new(HeadlessFileDialogs::new("no native file panels on this platform"))
}

/// A backend that never shows anything.
#[derive(Debug, Clone)]
pub struct HeadlessFileDialogs {
    reason: String,
}

impl HeadlessFileDialogs {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn unsupported(&self) -> Result<Option<PathBuf>, DialogError> {
        Err(DialogError::Unsupported(self.reason.clone()))
    }
}

impl FileDialogs for HeadlessFileDialogs {
    fn open_file(&self, _request: &OpenFileRequest) -> Result<Option<PathBuf>, DialogError> {
        self.unsupported()
    }

    fn choose_folder(&self, _request: &FolderRequest) -> Result<Option<PathBuf>, DialogError> {
        self.unsupported()
    }

    fn save_file(&self, _request: &SaveFileRequest) -> Result<Option<PathBuf>, DialogError> {
        self.unsupported()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_reports_unsupported_with_reason() {
        let dialogs = HeadlessFileDialogs::new("ci");
        match dialogs.open_file(&OpenFileRequest::default()) {
            Err(DialogError::Unsupported(reason)) => assert_eq!(reason, "ci"),
            other => panic!("expected Unsupported, got {other:?}"),
        }
        assert!(dialogs.save_file(&SaveFileRequest::default()).is_err());
        assert!(dialogs.choose_folder(&FolderRequest::default()).is_err());
    }
}
