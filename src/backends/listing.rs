//! Directory listing backend
//!
//! Uses walkdir for a single-level, sorted traversal

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::error::CountError;

/// List the regular files directly inside `dir`, sorted by path.
///
/// Symlinks to files are followed. Entries that fail to stat are skipped;
/// failing to read `dir` itself is an error.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>, CountError> {
    if !dir.is_dir() {
        return Err(CountError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    let mut files = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => return Err(CountError::Walk(e)),
            Err(_) => continue,
        };

        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn test_list_empty_dir() {
        let temp = tempdir().unwrap();
        let files = list_files(temp.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_list_files_only_top_level() {
        let temp = tempdir().unwrap();
        File::create(temp.path().join("b.txt")).unwrap();
        File::create(temp.path().join("a.txt")).unwrap();
        fs::create_dir(temp.path().join("subdir")).unwrap();
        File::create(temp.path().join("subdir").join("nested.txt")).unwrap();

        let files = list_files(temp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_list_missing_dir() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("missing");
        let err = list_files(&missing).unwrap_err();
        assert!(matches!(err, CountError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_list_file_is_not_a_directory() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("plain.txt");
        File::create(&file).unwrap();

        let err = list_files(&file).unwrap_err();
        assert!(matches!(err, CountError::DirectoryNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_list_follows_file_symlinks_and_skips_broken_ones() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("target.txt");
        fs::write(&target, "a b").unwrap();

        let dir = temp.path().join("dir");
        fs::create_dir(&dir).unwrap();
        std::os::unix::fs::symlink(&target, dir.join("link.txt")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone"), dir.join("broken")).unwrap();

        let files = list_files(&dir).unwrap();
        assert_eq!(files, vec![dir.join("link.txt")]);
    }
}
