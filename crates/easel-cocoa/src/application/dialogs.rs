//! DialogService: native open, folder, and save panels.
//!
//! Every dialog is modal and blocks the calling thread until the user
//! dismisses it.  The service builds the request (tilde expansion,
//! extension clean-up, splitting a save path into directory and name),
//! hands it to the [`FileDialogs`] backend, and folds every outcome other
//! than a confirmed choice into `None`.

use std::path::{Path, PathBuf};

use easel_core::{FolderRequest, OpenFileRequest, PathKind, SaveFileRequest};
use thiserror::Error;
use tracing::{debug, error, warn};

/// Error type for dialog backends.
#[derive(Debug, Error)]
pub enum DialogError {
    /// Panels are not available on this platform or in this process.
    #[error("file dialogs are not supported: {0}")]
    Unsupported(String),

    /// The user confirmed the panel but it reported no path.
    #[error("dialog returned an empty result")]
    EmptyResult,

    /// The native API failed.
    #[error("platform dialog error: {0}")]
    Platform(String),
}

/// Presents native file panels.
///
/// `Ok(None)` means the user cancelled.
#[cfg_attr(test, mockall::automock)]
pub trait FileDialogs {
    fn open_file(&self, request: &OpenFileRequest) -> Result<Option<PathBuf>, DialogError>;
    fn choose_folder(&self, request: &FolderRequest) -> Result<Option<PathBuf>, DialogError>;
    fn save_file(&self, request: &SaveFileRequest) -> Result<Option<PathBuf>, DialogError>;
}

/// Front end for the native file panels.
pub struct DialogService {
    backend: Box<dyn FileDialogs>,
    home: Option<PathBuf>,
}

impl DialogService {
    /// Creates a service that expands `~` against `$HOME`.
    pub fn new(backend: Box<dyn FileDialogs>) -> Self {
        Self::with_home(backend, std::env::var_os("HOME").map(PathBuf::from))
    }

    pub fn with_home(backend: Box<dyn FileDialogs>, home: Option<PathBuf>) -> Self {
        Self { backend, home }
    }

    /// Asks the user for one existing file.
    ///
    /// `extensions` restricts the selectable files when non-empty;
    /// `initial_path` positions the panel when non-empty.
    pub fn open_file_path<S: AsRef<str>>(
        &self,
        initial_path: &Path,
        extensions: &[S],
    ) -> Option<PathBuf> {
        let request = OpenFileRequest::new(initial_path, extensions, self.home.as_deref());
        debug!(?request, "presenting open panel");
        settle("open", self.backend.open_file(&request))
    }

    /// Asks the user for one directory.
    pub fn folder_path(&self, initial_path: &Path) -> Option<PathBuf> {
        let request = FolderRequest::new(initial_path, self.home.as_deref());
        debug!(?request, "presenting folder panel");
        settle("folder", self.backend.choose_folder(&request))
    }

    /// Asks the user where to save a file.
    ///
    /// If `initial_path` names an existing directory the panel opens there;
    /// otherwise its last component pre-fills the name field and its parent
    /// is the starting directory.
    pub fn save_file_path<S: AsRef<str>>(
        &self,
        initial_path: &Path,
        extensions: &[S],
    ) -> Option<PathBuf> {
        let home = self.home.as_deref();
        let request = SaveFileRequest::new(initial_path, extensions, home, PathKind::of);
        debug!(?request, "presenting save panel");
        settle("save", self.backend.save_file(&request))
    }
}

fn settle(kind: &str, outcome: Result<Option<PathBuf>, DialogError>) -> Option<PathBuf> {
    match outcome {
        Ok(Some(path)) => Some(path),
        Ok(None) => {
            debug!(kind, "dialog cancelled");
            None
        }
        Err(DialogError::EmptyResult) => {
            error!(kind, "empty path result");
            None
        }
        Err(e) => {
            warn!(kind, "dialog failed: {e}");
            None
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use std::ffi::OsString;

    fn service(mock: MockFileDialogs) -> DialogService {
        DialogService::with_home(Box::new(mock), Some(PathBuf::from("/Users/ada")))
    }

    #[test]
    fn test_open_file_forwards_expanded_directory_and_clean_extensions() {
        // Arrange
        let mut mock = MockFileDialogs::new();
        mock.expect_open_file()
            .with(eq(OpenFileRequest {
                initial_path: Some(PathBuf::from("/Users/ada/Pictures")),
                extensions: vec!["png".to_string(), "jpg".to_string()],
            }))
            .times(1)
            .returning(|_| Ok(Some(PathBuf::from("/Users/ada/Pictures/cat.png"))));
        let dialogs = service(mock);

        // Act
        let chosen = dialogs.open_file_path(Path::new("~/Pictures"), &[".png", "jpg"]);

        // Assert
        assert_eq!(chosen, Some(PathBuf::from("/Users/ada/Pictures/cat.png")));
    }

    #[test]
    fn test_open_file_cancel_returns_none() {
        let mut mock = MockFileDialogs::new();
        mock.expect_open_file().returning(|_| Ok(None));
        assert_eq!(service(mock).open_file_path(Path::new(""), &[] as &[&str]), None);
    }

    #[test]
    fn test_backend_failure_returns_none() {
        let mut mock = MockFileDialogs::new();
        mock.expect_choose_folder()
            .returning(|_| Err(DialogError::Unsupported("headless".into())));
        assert_eq!(service(mock).folder_path(Path::new("/tmp")), None);
    }

    #[test]
    fn test_empty_result_returns_none() {
        let mut mock = MockFileDialogs::new();
        mock.expect_open_file().returning(|_| Err(DialogError::EmptyResult));
        assert_eq!(service(mock).open_file_path(Path::new(""), &["txt"]), None);
    }

    #[test]
    fn test_folder_request_has_no_extensions_and_expands_tilde() {
        let mut mock = MockFileDialogs::new();
        mock.expect_choose_folder()
            .with(eq(FolderRequest {
                initial_path: Some(PathBuf::from("/Users/ada")),
            }))
            .returning(|_| Ok(Some(PathBuf::from("/Users/ada/renders"))));
        assert_eq!(
            service(mock).folder_path(Path::new("~")),
            Some(PathBuf::from("/Users/ada/renders"))
        );
    }

    #[test]
    fn test_save_to_missing_file_prefills_name_and_parent() {
        // Arrange: a path that cannot exist, so it is split into parent + name.
        let mut mock = MockFileDialogs::new();
        mock.expect_save_file()
            .with(eq(SaveFileRequest {
                directory: Some(PathBuf::from("/nonexistent/easel/out")),
                file_name: Some(OsString::from("frame.png")),
                extensions: vec!["png".to_string()],
            }))
            .times(1)
            .returning(|_| Ok(Some(PathBuf::from("/nonexistent/easel/out/frame.png"))));

        // Act
        let chosen =
            service(mock).save_file_path(Path::new("/nonexistent/easel/out/frame.png"), &["png"]);

        // Assert
        assert_eq!(chosen, Some(PathBuf::from("/nonexistent/easel/out/frame.png")));
    }

    #[test]
    fn test_save_into_existing_directory_prefills_no_name() {
        let dir = std::env::temp_dir();
        let expected = dir.clone();
        let mut mock = MockFileDialogs::new();
        mock.expect_save_file()
            .withf(move |req| {
                req.directory.as_deref() == Some(expected.as_path()) && req.file_name.is_none()
            })
            .returning(|_| Ok(None));
        assert_eq!(service(mock).save_file_path(&dir, &[] as &[&str]), None);
    }
}
