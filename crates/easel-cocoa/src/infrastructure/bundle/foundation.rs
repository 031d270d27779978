//! `NSBundle`-backed resource lookup (macOS and iOS).
//!
//! `pathForResource:ofType:inDirectory:` is called with the full file name
//! and a `nil` type, which makes Foundation match the name exactly,
//! extension included.

use std::path::{Path, PathBuf};

use easel_core::ResourceQuery;
use objc2::rc::Retained;
use objc2_foundation::{NSBundle, NSString};

use crate::application::resources::ResourceBundle;

/// An application bundle reached through Foundation.
///
/// Holds a path rather than the `NSBundle` itself; Foundation caches bundle
/// objects, so looking one up per call is cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundationBundle {
    /// `None` for the main bundle.
    path: Option<PathBuf>,
}

impl FoundationBundle {
    /// The process's main bundle.
    pub fn main() -> Self {
        Self { path: None }
    }

    /// The bundle at `path`, if Foundation recognises one there.
    pub fn at_path(path: &Path) -> Option<Self> {
        let bundle = Self {
            path: Some(path.to_path_buf()),
        };
        bundle.ns_bundle().map(|_| bundle)
    }

    #[allow(unused_unsafe)]
    fn ns_bundle(&self) -> Option<Retained<NSBundle>> {
        match &self.path {
            None => Some(unsafe { NSBundle::mainBundle() }),
            Some(path) => {
                let path = NSString::from_str(&path.to_string_lossy());
                unsafe { NSBundle::bundleWithPath(&path) }
            }
        }
    }
}

impl ResourceBundle for FoundationBundle {
    #[allow(unused_unsafe)]
    fn path_for_resource(&self, query: &ResourceQuery) -> Option<PathBuf> {
        let bundle = self.ns_bundle()?;
        let name = NSString::from_str(&query.file_name.to_string_lossy());
        let directory = query
            .subdirectory
            .as_ref()
            .map(|d| NSString::from_str(&d.to_string_lossy()));

        let found = unsafe {
            bundle.pathForResource_ofType_inDirectory(Some(&*name), None, directory.as_deref())
        }?;
        Some(PathBuf::from(found.to_string()))
    }

    #[allow(unused_unsafe)]
    fn resource_root(&self) -> Option<PathBuf> {
        let bundle = self.ns_bundle()?;
        let root = unsafe { bundle.resourcePath() }?;
        Some(PathBuf::from(root.to_string()))
    }

    #[allow(unused_unsafe)]
    fn application_dir(&self) -> Option<PathBuf> {
        let bundle = self.ns_bundle()?;
        let bundle_path = PathBuf::from(unsafe { bundle.bundlePath() }.to_string());
        bundle_path.parent().map(Path::to_path_buf)
    }
}
