use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::photostamp_core::error::{PhotostampError, Result};

/// Expand one user-supplied path into the regular files it names.
///
/// A file yields itself. A directory yields every regular file below it,
/// sorted by file name at each level. Links inside a directory are not
/// followed. Any walk error (including a root that does not exist) aborts
/// the whole input so a subtree is never partially processed.
pub fn expand_path(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|source| PhotostampError::PathNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    log::debug!("Expanded {} into {} files", path.display(), files.len());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_expand_single_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("IMG_0001.jpg");
        file.touch().unwrap();

        let files = expand_path(file.path()).unwrap();
        assert_eq!(files, vec![file.path().to_path_buf()]);
    }

    #[test]
    fn test_expand_directory_recursively() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("b.jpg").touch().unwrap();
        temp.child("a.jpg").touch().unwrap();
        temp.child("2021/c.mp4").touch().unwrap();
        temp.child("2021/deep/d.png").touch().unwrap();
        temp.child("empty").create_dir_all().unwrap();

        let files = expand_path(temp.path()).unwrap();
        let relative: Vec<PathBuf> = files
            .iter()
            .map(|p| p.strip_prefix(temp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from("2021/c.mp4"),
                PathBuf::from("2021/deep/d.png"),
                PathBuf::from("a.jpg"),
                PathBuf::from("b.jpg"),
            ]
        );
    }

    #[test]
    fn test_expand_missing_path() {
        let temp = assert_fs::TempDir::new().unwrap();
        let missing = temp.child("does-not-exist");

        let err = expand_path(missing.path()).unwrap_err();
        assert!(matches!(err, PhotostampError::PathNotFound { .. }));
        assert_eq!(err.reason(), "path or directory not found");
        assert!(err.diagnostic().contains("does-not-exist"));
    }

    #[cfg(unix)]
    #[test]
    fn test_expand_does_not_follow_directory_links() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("photos/a.jpg").touch().unwrap();
        std::os::unix::fs::symlink(temp.path(), temp.child("photos/loop").path()).unwrap();

        let files = expand_path(temp.child("photos").path()).unwrap();
        assert_eq!(files, vec![temp.child("photos/a.jpg").path().to_path_buf()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_expand_unreadable_subdirectory_yields_nothing() {
        use std::os::unix::fs::PermissionsExt;

        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a.jpg").touch().unwrap();
        temp.child("locked/b.jpg").touch().unwrap();
        temp.child("z.jpg").touch().unwrap();
        let locked = temp.child("locked");
        std::fs::set_permissions(locked.path(), std::fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not stop root.
        if std::fs::read_dir(locked.path()).is_ok() {
            std::fs::set_permissions(locked.path(), std::fs::Permissions::from_mode(0o755))
                .unwrap();
            return;
        }

        let result = expand_path(temp.path());
        std::fs::set_permissions(locked.path(), std::fs::Permissions::from_mode(0o755)).unwrap();

        let err = result.unwrap_err();
        assert!(matches!(err, PhotostampError::PathNotFound { ref path, .. } if path == temp.path()));
        assert_eq!(err.reason(), "path or directory not found");
    }
}
