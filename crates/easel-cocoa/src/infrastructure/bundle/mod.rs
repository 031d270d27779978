//! Application bundle adapters.
//!
//! | Type               | Targets      | Backed by                                |
//! |--------------------|--------------|------------------------------------------|
//! | `FoundationBundle` | macOS, iOS   | `NSBundle` (`mainBundle`, `bundleWithPath:`) |
//! | `DirectoryBundle`  | all          | a `.app` directory or a plain directory  |
//!
//! [`default_bundle`] picks the main bundle on Apple targets and the
//! executable's directory elsewhere.

use std::path::{Path, PathBuf};

use easel_core::ResourceQuery;

use crate::application::resources::ResourceBundle;

#[cfg(any(target_os = "macos", target_os = "ios"))]
pub mod foundation;

#[cfg(any(target_os = "macos", target_os = "ios"))]
pub use foundation::FoundationBundle;

/// The bundle used when the host installs none.
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub fn default_bundle() -> Box<dyn ResourceBundle> {
    Box::new(FoundationBundle::main())
}

/// The bundle used when the host installs none.
#[cfg(not(any(target_os = "macos", target_os = "ios")))]
pub fn default_bundle() -> Box<dyn ResourceBundle> {
    Box::new(DirectoryBundle::beside_executable())
}

/// Opens the bundle at `path`, or `None` if nothing usable is there.
pub fn bundle_at(path: &Path) -> Option<Box<dyn ResourceBundle>> {
    #[cfg(any(target_os = "macos", target_os = "ios"))]
    if let Some(bundle) = FoundationBundle::at_path(path) {
        return Some(Box::new(bundle));
    }
    DirectoryBundle::open(path).map(|b| Box::new(b) as Box<dyn ResourceBundle>)
}

/// A bundle read straight from the filesystem.
///
/// A directory named `*.app` is treated as an application bundle: resources
/// live in `Contents/Resources` when that exists (macOS layout) and at the
/// top level otherwise (iOS layout), and the application directory is the
/// bundle's parent.  Any other directory is used as the resource root
/// directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryBundle {
    resource_root: PathBuf,
    application_dir: Option<PathBuf>,
}

impl DirectoryBundle {
    /// Opens `path`, returning `None` if it is not a directory.
    pub fn open(path: &Path) -> Option<Self> {
        if !path.is_dir() {
            return None;
        }
        let is_app = path.extension().is_some_and(|ext| ext == "app");
        if !is_app {
            return Some(Self {
                resource_root: path.to_path_buf(),
                application_dir: None,
            });
        }

        let contents_resources = path.join("Contents").join("Resources");
        let resource_root = if contents_resources.is_dir() {
            contents_resources
        } else {
            path.to_path_buf()
        };
        Some(Self {
            resource_root,
            application_dir: path.parent().map(Path::to_path_buf),
        })
    }

    /// A bundle rooted at the running executable's directory.
    pub fn beside_executable() -> Self {
        let dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        Self {
            resource_root: dir.clone(),
            application_dir: Some(dir),
        }
    }
}

impl ResourceBundle for DirectoryBundle {
    fn path_for_resource(&self, query: &ResourceQuery) -> Option<PathBuf> {
        let mut path = self.resource_root.clone();
        if let Some(subdirectory) = &query.subdirectory {
            path.push(subdirectory);
        }
        path.push(&query.file_name);
        path.exists().then_some(path)
    }

    fn resource_root(&self) -> Option<PathBuf> {
        Some(self.resource_root.clone())
    }

    fn application_dir(&self) -> Option<PathBuf> {
        self.application_dir.clone()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("easel_bundle_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_mac_app_layout_uses_contents_resources() {
        // Arrange
        let root = temp_dir();
        let app = root.join("Sketch.app");
        std::fs::create_dir_all(app.join("Contents/Resources/shaders")).unwrap();
        std::fs::write(app.join("Contents/Resources/shaders/blur.frag"), b"void main(){}").unwrap();

        // Act
        let bundle = DirectoryBundle::open(&app).expect("directory");
        let found = bundle.path_for_resource(&ResourceQuery {
            subdirectory: Some(PathBuf::from("shaders")),
            file_name: OsString::from("blur.frag"),
        });

        // Assert
        assert_eq!(bundle.resource_root(), Some(app.join("Contents/Resources")));
        assert_eq!(bundle.application_dir(), Some(root.clone()));
        assert_eq!(found, Some(app.join("Contents/Resources/shaders/blur.frag")));

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_ios_app_layout_uses_bundle_root() {
        let root = temp_dir();
        let app = root.join("Sketch.app");
        std::fs::create_dir_all(&app).unwrap();

        let bundle = DirectoryBundle::open(&app).expect("directory");
        assert_eq!(bundle.resource_root(), Some(app.clone()));

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_missing_resource_is_none() {
        let root = temp_dir();
        let bundle = DirectoryBundle::open(&root).expect("directory");
        assert_eq!(
            bundle.path_for_resource(&ResourceQuery {
                subdirectory: None,
                file_name: OsString::from("nope.png"),
            }),
            None
        );
        assert_eq!(bundle.application_dir(), None);
        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_open_non_directory_is_none() {
        assert!(DirectoryBundle::open(Path::new("/definitely/not/here/Sketch.app")).is_none());
    }
}
