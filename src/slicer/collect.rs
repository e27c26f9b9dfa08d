//! Entry collection.
//! Walks a source tree and records every non-hidden, non-directory entry.
//!
//! Notes:
//! - A name is hidden when it starts with '.'; hidden directories are pruned with their subtree.
//! - Symlinks are recorded as entries and never followed.
//! - Any walk error aborts the whole collection; no partial result is returned.

use anyhow::{Context, Result};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::errors::DirSliceError;
use crate::shutdown;

/// Upper bound on directory handles held open at once during a walk.
/// Deeper levels are buffered in memory instead of keeping their handle open.
const MAX_OPEN_DIRS: usize = 8;

/// One file discovered under the source root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileLocation {
    /// Directory relative to the source root; empty for the root itself.
    pub dir: PathBuf,
    /// File name within `dir`.
    pub name: OsString,
}

impl FileLocation {
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<OsString>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
        }
    }

    /// Absolute (or root-relative) path of this file under `root`.
    pub fn source_path(&self, root: &Path) -> PathBuf {
        root.join(&self.dir).join(&self.name)
    }
}

/// True if the name begins with a literal dot.
pub fn is_hidden(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

fn keep(entry: &DirEntry) -> bool {
    // The walk root itself is never filtered, even if it is named ".something" or ".".
    entry.depth() == 0 || !is_hidden(entry.file_name())
}

/// Recursively collect every visible file under `root/sub_path`.
///
/// Returned directories are relative to `root`. Order is whatever the
/// underlying listing yields.
pub fn collect(root: &Path, sub_path: &Path) -> Result<Vec<FileLocation>> {
    let start = root.join(sub_path);
    debug!(root = %root.display(), start = %start.display(), "collecting entries");

    let mut files = Vec::new();
    let walker = WalkDir::new(&start)
        .follow_links(false)
        .max_open(MAX_OPEN_DIRS)
        .into_iter()
        .filter_entry(keep);

    for entry in walker {
        if shutdown::is_requested() {
            return Err(DirSliceError::Interrupted.into());
        }

        let entry = entry.with_context(|| format!("walk source directory '{}'", start.display()))?;
        if entry.file_type().is_dir() {
            continue;
        }

        let parent = entry.path().parent().unwrap_or(root);
        let dir = parent.strip_prefix(root).unwrap_or(parent).to_path_buf();
        trace!(dir = %dir.display(), name = ?entry.file_name(), "collected");
        files.push(FileLocation::new(dir, entry.file_name()));
    }

    debug!(count = files.len(), "collection finished");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(p: &Path) {
        fs::write(p, b"").unwrap();
    }

    fn sorted(mut v: Vec<FileLocation>) -> Vec<FileLocation> {
        v.sort_by(|a, b| (&a.dir, &a.name).cmp(&(&b.dir, &b.name)));
        v
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let td = tempdir().unwrap();
        let files = collect(td.path(), Path::new(".")).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn flat_directory() {
        let td = tempdir().unwrap();
        for i in 0..5 {
            touch(&td.path().join(format!("file-{i}")));
        }
        let files = sorted(collect(td.path(), Path::new(".")).unwrap());
        let expected: Vec<_> = (0..5)
            .map(|i| FileLocation::new("", format!("file-{i}")))
            .collect();
        assert_eq!(files, expected);
    }

    #[test]
    fn nested_directory_records_relative_dir() {
        let td = tempdir().unwrap();
        touch(&td.path().join("top"));
        let sub = td.path().join("dir-1").join("deeper");
        fs::create_dir_all(&sub).unwrap();
        touch(&td.path().join("dir-1").join("mid"));
        touch(&sub.join("leaf"));

        let files = sorted(collect(td.path(), Path::new(".")).unwrap());
        assert_eq!(
            files,
            vec![
                FileLocation::new("", "top"),
                FileLocation::new("dir-1", "mid"),
                FileLocation::new(Path::new("dir-1").join("deeper"), "leaf"),
            ]
        );
    }

    #[test]
    fn hidden_files_and_directories_are_skipped() {
        let td = tempdir().unwrap();
        touch(&td.path().join(".hidden"));
        touch(&td.path().join("visible"));
        let hidden_dir = td.path().join(".git");
        fs::create_dir_all(&hidden_dir).unwrap();
        touch(&hidden_dir.join("config"));
        let sub = td.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        touch(&sub.join(".DS_Store"));

        let files = collect(td.path(), Path::new(".")).unwrap();
        assert_eq!(files, vec![FileLocation::new("", "visible")]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let td = tempdir().unwrap();
        let err = collect(&td.path().join("nope"), Path::new(".")).unwrap_err();
        assert!(format!("{err:#}").contains("walk source directory"));
    }

    #[test]
    fn is_hidden_checks_leading_dot_only() {
        assert!(is_hidden(OsStr::new(".env")));
        assert!(is_hidden(OsStr::new(".")));
        assert!(!is_hidden(OsStr::new("a.b")));
        assert!(!is_hidden(OsStr::new("")));
    }

    #[test]
    fn source_path_joins_root_dir_and_name() {
        let loc = FileLocation::new("a/b", "c.txt");
        assert_eq!(loc.source_path(Path::new("/r")), PathBuf::from("/r/a/b/c.txt"));
        let top = FileLocation::new("", "c.txt");
        assert_eq!(top.source_path(Path::new("/r")), PathBuf::from("/r/c.txt"));
    }
}
