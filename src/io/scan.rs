//! Input discovery and output directory setup

use crate::types::CnabError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// List the regular files of `dir`, sorted by path
///
/// Subdirectories are ignored; symlinks count when they point at a regular
/// file. No filtering by extension is done because bank systems name
/// remittance files inconsistently.
///
/// # Errors
///
/// * `CnabError::FileNotFound` if `dir` does not exist
/// * `CnabError::IoError` if it cannot be listed
pub fn list_input_files(dir: &Path) -> Result<Vec<PathBuf>, CnabError> {
    let entries = fs::read_dir(dir).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CnabError::file_not_found(dir),
        _ => CnabError::IoError {
            message: format!("Failed to list '{}': {}", dir.display(), e),
        },
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        // `Path::is_file` follows symlinks
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

/// Create `dir` (and its parents) if it does not exist
pub fn ensure_dir(dir: &Path) -> Result<(), CnabError> {
    fs::create_dir_all(dir).map_err(|e| CnabError::IoError {
        message: format!("Failed to create '{}': {}", dir.display(), e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lists_only_files_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.rem"), "x").unwrap();
        fs::write(dir.path().join("a.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let files = list_input_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.txt", "b.rem"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_follows_symlinked_files() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let target = outside.path().join("remessa.rem");
        fs::write(&target, "x").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("link.rem")).unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("linked_dir")).unwrap();

        let files = list_input_files(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("link.rem")]);
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(list_input_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let result = list_input_files(&dir.path().join("CNABs"));
        assert!(matches!(result, Err(CnabError::FileNotFound { .. })));
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("Convertidos").join("2024");

        ensure_dir(&target).unwrap();
        ensure_dir(&target).unwrap();
        assert!(target.is_dir());
    }
}
