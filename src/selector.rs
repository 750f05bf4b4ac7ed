// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Best-candidate selection inside a leaf folder

use std::cmp::Ordering;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::{ImportError, Result};

/// Default recognized image extensions
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// Check whether a file name ends in one of `extensions` (case-insensitive)
pub fn is_image_candidate(file_name: &str, extensions: &[String]) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// Ordering for candidate files, best first.
///
/// Names containing "copy" (any case) come before those that don't; within
/// each group longer names come first. Anything equal on both keys compares
/// equal and keeps its listing order under a stable sort.
pub fn compare_candidates(a: &str, b: &str) -> Ordering {
    let a_copy = a.to_lowercase().contains("copy");
    let b_copy = b.to_lowercase().contains("copy");

    b_copy
        .cmp(&a_copy)
        .then_with(|| b.chars().count().cmp(&a.chars().count()))
}

/// Pick the best image directly inside `folder`.
///
/// Returns `Ok(None)` when the folder does not exist or holds no image.
/// Files whose names are not valid UTF-8 are ignored.
pub fn select_best_candidate(folder: &Path, extensions: &[String]) -> Result<Option<PathBuf>> {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ImportError::ListFailed {
                path: folder.to_path_buf(),
                source: e,
            })
        }
    };

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ImportError::ListFailed {
            path: folder.to_path_buf(),
            source: e,
        })?;
        if !entry.path().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_image_candidate(name, extensions) {
                candidates.push(name.to_string());
            }
        }
    }

    candidates.sort_by(|a, b| compare_candidates(a, b));
    trace!("Candidates in {:?}: {:?}", folder, candidates);

    Ok(candidates.into_iter().next().map(|name| folder.join(name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn default_exts() -> Vec<String> {
        IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_is_image_candidate() {
        let exts = default_exts();
        assert!(is_image_candidate("view.jpg", &exts));
        assert!(is_image_candidate("VIEW.JPEG", &exts));
        assert!(is_image_candidate("a.b.Jpg", &exts));
        assert!(!is_image_candidate("view.png", &exts));
        assert!(!is_image_candidate("jpg", &exts));
        assert!(!is_image_candidate("view.jpg.xmp", &exts));
    }

    #[test]
    fn test_compare_prefers_copy_then_length() {
        let mut names = vec!["a.jpg", "a_copy.jpg", "b_copy_final.jpg", "longer_name.jpg"];
        names.sort_by(|a, b| compare_candidates(a, b));
        assert_eq!(names, vec!["b_copy_final.jpg", "a_copy.jpg", "longer_name.jpg", "a.jpg"]);
    }

    #[test]
    fn test_compare_copy_is_case_insensitive() {
        assert_eq!(compare_candidates("x COPY.jpg", "much_longer_name.jpg"), Ordering::Less);
    }

    #[test]
    fn test_compare_equal_keys() {
        assert_eq!(compare_candidates("a.jpg", "b.jpg"), Ordering::Equal);
    }

    #[test]
    fn test_select_best_candidate() {
        let dir = TempDir::new().unwrap();
        for name in ["a.jpg", "a_copy.jpg", "b_copy_final.jpg", "notes_copy_really_long.txt"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        // Directories are never candidates, even with an image-like name
        fs::create_dir(dir.path().join("folder_copy_very_long_name.jpg")).unwrap();

        let best = select_best_candidate(dir.path(), &default_exts()).unwrap();
        assert_eq!(best, Some(dir.path().join("b_copy_final.jpg")));
    }

    #[test]
    fn test_select_missing_folder() {
        let dir = TempDir::new().unwrap();
        let best = select_best_candidate(&dir.path().join("absent"), &default_exts()).unwrap();
        assert_eq!(best, None);
    }

    #[test]
    fn test_select_on_file_is_list_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.jpg");
        fs::write(&file, b"x").unwrap();

        match select_best_candidate(&file, &default_exts()) {
            Err(ImportError::ListFailed { path, .. }) => assert_eq!(path, file),
            other => panic!("Expected ListFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_select_no_images() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("readme.txt"), b"x").unwrap();
        let best = select_best_candidate(dir.path(), &default_exts()).unwrap();
        assert_eq!(best, None);
    }
}
