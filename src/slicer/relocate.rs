//! Relocation of one group of files into one destination directory.
//!
//! Policy:
//! - Destination names are uniquified against the NameSet for this directory.
//! - Names that already exist on disk (e.g. from an earlier run) count as taken; nothing is overwritten.
//! - A failed move is logged and recorded, and the batch continues with the next file.
//! - A shutdown request stops the batch before the next file.

use anyhow::Result;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::collect::FileLocation;
use super::names::{uniquify, NameSet};
use crate::errors::DirSliceError;
use crate::fs_ops::{move_file, MoveMethod};
use crate::shutdown;

/// A planned or completed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Moved {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// A move that failed; the source is left in place.
#[derive(Debug)]
pub struct FailedMove {
    pub from: PathBuf,
    pub to: PathBuf,
    pub error: anyhow::Error,
}

/// Outcome of relocating one batch.
#[derive(Debug, Default)]
pub struct RelocateReport {
    pub moved: Vec<Moved>,
    pub failed: Vec<FailedMove>,
    /// Moves that fell back to copy+remove.
    pub copied: usize,
}

impl RelocateReport {
    pub fn merge(&mut self, other: RelocateReport) {
        self.moved.extend(other.moved);
        self.failed.extend(other.failed);
        self.copied += other.copied;
    }
}

fn taken_on_disk(path: &Path) -> bool {
    // symlink_metadata so dangling links in the target also count.
    fs::symlink_metadata(path).is_ok()
}

/// Pick the destination path for `name` in `target_dir` and record it in `seen`.
pub fn destination_for(target_dir: &Path, name: &OsStr, seen: &mut NameSet) -> PathBuf {
    let mut chosen = uniquify(name, seen);
    while taken_on_disk(&target_dir.join(&chosen)) {
        seen.insert(chosen);
        chosen = uniquify(name, seen);
    }
    let dest = target_dir.join(&chosen);
    seen.insert(chosen);
    dest
}

/// Move `files` from under `source_root` into `target_dir`, in order.
///
/// With `dry_run` set the destinations are computed and reported but nothing
/// is touched. Returns `Err` only for an interrupt; per-file failures end up
/// in the report.
pub fn relocate(
    source_root: &Path,
    target_dir: &Path,
    files: &[FileLocation],
    seen: &mut NameSet,
    dry_run: bool,
) -> Result<RelocateReport> {
    let mut report = RelocateReport::default();

    for loc in files {
        if shutdown::is_requested() {
            return Err(DirSliceError::Interrupted.into());
        }

        let from = loc.source_path(source_root);
        let to = destination_for(target_dir, &loc.name, seen);

        if dry_run {
            debug!(from = %from.display(), to = %to.display(), "dry-run: would move file");
            report.moved.push(Moved { from, to });
            continue;
        }

        match move_file(&from, &to) {
            Ok(method) => {
                debug!(from = %from.display(), to = %to.display(), ?method, "moved");
                if method == MoveMethod::Copied {
                    report.copied += 1;
                }
                report.moved.push(Moved { from, to });
            }
            Err(error) => {
                warn!(from = %from.display(), to = %to.display(), error = %format!("{error:#}"), "move failed; continuing");
                report.failed.push(FailedMove { from, to, error });
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup(names: &[(&str, &str)]) -> (tempfile::TempDir, Vec<FileLocation>) {
        let td = tempdir().unwrap();
        let mut locs = Vec::new();
        for (dir, name) in names {
            let d = td.path().join(dir);
            fs::create_dir_all(&d).unwrap();
            fs::write(d.join(name), format!("{dir}/{name}")).unwrap();
            locs.push(FileLocation::new(*dir, *name));
        }
        (td, locs)
    }

    #[test]
    fn same_names_from_different_dirs_get_suffixes() {
        let (src, locs) = setup(&[("a", "x"), ("b", "x"), ("c", "x")]);
        let dst = tempdir().unwrap();
        let mut seen = NameSet::new();

        let report = relocate(src.path(), dst.path(), &locs, &mut seen, false).unwrap();
        assert_eq!(report.moved.len(), 3);
        assert!(report.failed.is_empty());
        assert_eq!(fs::read_to_string(dst.path().join("x")).unwrap(), "a/x");
        assert_eq!(fs::read_to_string(dst.path().join("x(1)")).unwrap(), "b/x");
        assert_eq!(fs::read_to_string(dst.path().join("x(2)")).unwrap(), "c/x");
    }

    #[test]
    fn existing_target_files_are_not_overwritten() {
        let (src, locs) = setup(&[("", "keep")]);
        let dst = tempdir().unwrap();
        fs::write(dst.path().join("keep"), "old").unwrap();
        fs::write(dst.path().join("keep(1)"), "older").unwrap();
        let mut seen = NameSet::new();

        let report = relocate(src.path(), dst.path(), &locs, &mut seen, false).unwrap();
        assert_eq!(report.moved[0].to, dst.path().join("keep(2)"));
        assert_eq!(fs::read_to_string(dst.path().join("keep")).unwrap(), "old");
        assert_eq!(fs::read_to_string(dst.path().join("keep(2)")).unwrap(), "/keep");
    }

    #[test]
    fn failed_move_is_recorded_and_batch_continues() {
        let (src, mut locs) = setup(&[("", "present")]);
        locs.insert(0, FileLocation::new("", "vanished"));
        let dst = tempdir().unwrap();
        let mut seen = NameSet::new();

        let report = relocate(src.path(), dst.path(), &locs, &mut seen, false).unwrap();
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].from, src.path().join("vanished"));
        assert_eq!(report.moved.len(), 1);
        assert!(dst.path().join("present").exists());
    }

    #[test]
    fn dry_run_leaves_files_in_place() {
        let (src, locs) = setup(&[("d", "f"), ("e", "f")]);
        let dst = tempdir().unwrap();
        let mut seen = NameSet::new();

        let report = relocate(src.path(), dst.path(), &locs, &mut seen, true).unwrap();
        assert_eq!(report.moved.len(), 2);
        assert_eq!(report.moved[1].to, dst.path().join("f(1)"));
        assert!(src.path().join("d").join("f").exists());
        assert!(!dst.path().join("f").exists());
    }

    #[test]
    fn destination_for_records_choice() {
        let dst = tempdir().unwrap();
        let mut seen = NameSet::new();
        let a = destination_for(dst.path(), OsStr::new("n"), &mut seen);
        let b = destination_for(dst.path(), OsStr::new("n"), &mut seen);
        assert_eq!(a, dst.path().join("n"));
        assert_eq!(b, dst.path().join("n(1)"));
        assert_eq!(seen.len(), 2);
    }
}
