//! File dialog requests.
//!
//! The native panels take a starting directory, an optional pre-filled
//! file name (save panels only), and an optional list of allowed file
//! extensions.  This module turns the framework's single "initial path"
//! argument into those pieces.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// What the filesystem says about a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Directory,
    File,
    Missing,
}

impl PathKind {
    /// Queries the filesystem for `path`.
    pub fn of(path: &Path) -> Self {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_dir() => PathKind::Directory,
            Ok(_) => PathKind::File,
            Err(_) => PathKind::Missing,
        }
    }
}

/// A single-file open panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpenFileRequest {
    /// Directory the panel starts in, already tilde-expanded.
    pub initial_path: Option<PathBuf>,
    /// Allowed extensions without the leading dot.  Empty allows any file.
    pub extensions: Vec<String>,
}

impl OpenFileRequest {
    pub fn new<S: AsRef<str>>(initial_path: &Path, extensions: &[S], home: Option<&Path>) -> Self {
        Self {
            initial_path: non_empty(initial_path).map(|p| expand_tilde(p, home)),
            extensions: normalize_extensions(extensions),
        }
    }
}

/// A single-directory open panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FolderRequest {
    pub initial_path: Option<PathBuf>,
}

impl FolderRequest {
    pub fn new(initial_path: &Path, home: Option<&Path>) -> Self {
        Self {
            initial_path: non_empty(initial_path).map(|p| expand_tilde(p, home)),
        }
    }
}

/// A save panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SaveFileRequest {
    /// Directory the panel starts in.
    pub directory: Option<PathBuf>,
    /// File name pre-filled in the name field.
    pub file_name: Option<OsString>,
    pub extensions: Vec<String>,
}

impl SaveFileRequest {
    /// Builds the request from the caller's starting path.
    ///
    /// `kind_of` is asked about the tilde-expanded path; production code
    /// passes [`PathKind::of`].
    pub fn new<S, F>(initial_path: &Path, extensions: &[S], home: Option<&Path>, kind_of: F) -> Self
    where
        S: AsRef<str>,
        F: FnOnce(&Path) -> PathKind,
    {
        let (directory, file_name) = match non_empty(initial_path) {
            Some(path) => {
                let expanded = expand_tilde(path, home);
                let kind = kind_of(&expanded);
                split_save_location(&expanded, kind)
            }
            None => (None, None),
        };
        Self {
            directory,
            file_name,
            extensions: normalize_extensions(extensions),
        }
    }
}

/// Strips leading dots and drops empty entries: `[".png", "jpg", ""]`
/// becomes `["png", "jpg"]`.
pub fn normalize_extensions<S: AsRef<str>>(extensions: &[S]) -> Vec<String> {
    extensions
        .iter()
        .map(|e| e.as_ref().trim().trim_start_matches('.'))
        .filter(|e| !e.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Expands a leading `~` component against `home`.
///
/// `~user` forms and paths without a leading tilde are returned unchanged,
/// as is everything when `home` is unknown.
pub fn expand_tilde(path: &Path, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            let rest = components.as_path();
            if rest.as_os_str().is_empty() {
                home.to_path_buf()
            } else {
                home.join(rest)
            }
        }
        _ => path.to_path_buf(),
    }
}

/// Splits a save panel's starting path into a directory and a file name.
///
/// An existing directory is used as-is.  An existing file, or a path that
/// does not exist yet, contributes its last component as the pre-filled
/// name and its parent as the directory.
pub fn split_save_location(path: &Path, kind: PathKind) -> (Option<PathBuf>, Option<OsString>) {
    match kind {
        PathKind::Directory => (Some(path.to_path_buf()), None),
        PathKind::File | PathKind::Missing => {
            let file_name = path.file_name().map(|n| n.to_os_string());
            let directory = match file_name {
                Some(_) => path.parent().and_then(non_empty).map(Path::to_path_buf),
                None => Some(path.to_path_buf()),
            };
            (directory, file_name)
        }
    }
}

fn non_empty(path: &Path) -> Option<&Path> {
    if path.as_os_str().is_empty() {
        None
    } else {
        Some(path)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = "/Users/ada";

    fn home() -> Option<&'static Path> {
        Some(Path::new(HOME))
    }

    #[test]
    fn test_normalize_extensions_strips_dots_and_empties() {
        let normalized = normalize_extensions(&[".png", "jpg", "", " .tiff "]);
        assert_eq!(normalized, vec!["png", "jpg", "tiff"]);
    }

    #[test]
    fn test_expand_tilde_alone_is_home() {
        assert_eq!(expand_tilde(Path::new("~"), home()), PathBuf::from(HOME));
    }

    #[test]
    fn test_expand_tilde_prefix_joins_rest() {
        assert_eq!(
            expand_tilde(Path::new("~/Desktop/out.png"), home()),
            PathBuf::from("/Users/ada/Desktop/out.png")
        );
    }

    #[test]
    fn test_expand_tilde_leaves_other_forms_alone() {
        assert_eq!(
            expand_tilde(Path::new("~bob/x"), home()),
            PathBuf::from("~bob/x")
        );
        assert_eq!(expand_tilde(Path::new("/tmp/~"), home()), PathBuf::from("/tmp/~"));
        assert_eq!(expand_tilde(Path::new("~/x"), None), PathBuf::from("~/x"));
    }

    #[test]
    fn test_open_request_with_empty_initial_path_has_no_directory() {
        let request = OpenFileRequest::new(Path::new(""), &["png"], home());
        assert_eq!(request.initial_path, None);
        assert_eq!(request.extensions, vec!["png"]);
    }

    #[test]
    fn test_folder_request_expands_tilde() {
        let request = FolderRequest::new(Path::new("~/Pictures"), home());
        assert_eq!(request.initial_path, Some(PathBuf::from("/Users/ada/Pictures")));
    }

    #[test]
    fn test_save_split_existing_directory_prefills_no_name() {
        let (dir, name) = split_save_location(Path::new("/Users/ada/Desktop"), PathKind::Directory);
        assert_eq!(dir, Some(PathBuf::from("/Users/ada/Desktop")));
        assert_eq!(name, None);
    }

    #[test]
    fn test_save_split_existing_file_uses_parent_and_name() {
        let (dir, name) = split_save_location(Path::new("/Users/ada/out.png"), PathKind::File);
        assert_eq!(dir, Some(PathBuf::from("/Users/ada")));
        assert_eq!(name, Some(OsString::from("out.png")));
    }

    #[test]
    fn test_save_split_missing_path_uses_parent_and_name() {
        let (dir, name) =
            split_save_location(Path::new("/Users/ada/new/render.tif"), PathKind::Missing);
        assert_eq!(dir, Some(PathBuf::from("/Users/ada/new")));
        assert_eq!(name, Some(OsString::from("render.tif")));
    }

    #[test]
    fn test_save_split_bare_file_name_has_no_directory() {
        let (dir, name) = split_save_location(Path::new("render.tif"), PathKind::Missing);
        assert_eq!(dir, None);
        assert_eq!(name, Some(OsString::from("render.tif")));
    }

    #[test]
    fn test_save_request_consults_filesystem_on_expanded_path() {
        // Arrange
        let mut asked = None;

        // Act
        let request = SaveFileRequest::new(Path::new("~/Desktop"), &[".png"], home(), |p| {
            asked = Some(p.to_path_buf());
            PathKind::Directory
        });

        // Assert
        assert_eq!(asked, Some(PathBuf::from("/Users/ada/Desktop")));
        assert_eq!(request.directory, Some(PathBuf::from("/Users/ada/Desktop")));
        assert_eq!(request.file_name, None);
        assert_eq!(request.extensions, vec!["png"]);
    }

    #[test]
    fn test_save_request_without_initial_path_never_touches_filesystem() {
        let request = SaveFileRequest::new(Path::new(""), &[] as &[&str], home(), |_| {
            panic!("must not be consulted")
        });
        assert_eq!(request, SaveFileRequest::default());
    }

    #[test]
    fn test_path_kind_of_reports_directory_and_missing() {
        assert_eq!(PathKind::of(&std::env::temp_dir()), PathKind::Directory);
        assert_eq!(
            PathKind::of(Path::new("/definitely/not/here/easel")),
            PathKind::Missing
        );
    }
}
