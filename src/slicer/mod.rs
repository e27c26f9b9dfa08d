//! Slicing engine.
//!
//! Collects every visible file under a source tree, orders the files by name,
//! cuts the list into groups of a fixed size and moves each group into its own
//! subdirectory of the target (or straight into the target when one group suffices).
//!
//! Error policy:
//! - Traversal errors abort before anything is moved.
//! - Failing to create a group directory aborts the run; earlier groups stay moved.
//! - Single-file move failures are logged and collected in the report.

pub mod collect;
pub mod names;
pub mod partition;
pub mod relocate;

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::DirSliceError;
use crate::fs_ops::io_error_with_help;

pub use collect::{collect, is_hidden, FileLocation};
pub use names::{prefix, uniquify, NameSet};
pub use partition::{compute_groups, Group};
pub use relocate::{relocate, FailedMove, Moved, RelocateReport};

/// Knobs for one slicing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceOptions {
    /// Files per group; must be at least 1.
    pub group_size: usize,
    /// Compute and report the plan without touching the filesystem.
    pub dry_run: bool,
}

impl SliceOptions {
    pub fn new(group_size: usize) -> Self {
        Self {
            group_size,
            dry_run: false,
        }
    }
}

/// Result of a slicing pass.
#[derive(Debug, Default)]
pub struct SliceReport {
    /// Files found in the source.
    pub total: usize,
    /// Group directories used, in order; empty when files went into the target root.
    pub group_dirs: Vec<PathBuf>,
    pub moves: RelocateReport,
}

impl SliceReport {
    /// True when every collected file reached its destination (or would, on a dry run).
    pub fn is_complete(&self) -> bool {
        self.moves.failed.is_empty() && self.moves.moved.len() == self.total
    }
}

/// Slice `source_root` into `target_root` with groups of `group_size` files.
pub fn slice_dir(source_root: &Path, target_root: &Path, group_size: usize) -> Result<SliceReport> {
    slice_dir_with(source_root, target_root, SliceOptions::new(group_size))
}

/// [`slice_dir`] with explicit options.
pub fn slice_dir_with(
    source_root: &Path,
    target_root: &Path,
    opts: SliceOptions,
) -> Result<SliceReport> {
    if opts.group_size == 0 {
        return Err(DirSliceError::InvalidSliceSize(0).into());
    }

    let mut files = collect(source_root, Path::new("."))?;
    files.sort_by(|a, b| a.name.cmp(&b.name));
    info!(source = %source_root.display(), files = files.len(), group_size = opts.group_size, "collected source files");

    let groups = compute_groups(&files, opts.group_size);
    let mut report = SliceReport {
        total: files.len(),
        ..Default::default()
    };

    for group in &groups {
        let target_dir = match &group.dir_name {
            Some(name) => {
                let dir = target_root.join(name);
                if opts.dry_run {
                    info!(dir = %dir.display(), files = group.len(), "dry-run: would create group directory");
                } else {
                    fs::create_dir_all(&dir).map_err(io_error_with_help("create group directory", &dir))?;
                    debug!(dir = %dir.display(), files = group.len(), "group directory ready");
                }
                report.group_dirs.push(dir.clone());
                dir
            }
            None => target_root.to_path_buf(),
        };

        let mut seen = NameSet::new();
        let moved = relocate(
            source_root,
            &target_dir,
            &files[group.range()],
            &mut seen,
            opts.dry_run,
        )?;
        info!(
            dir = %target_dir.display(),
            moved = moved.moved.len(),
            failed = moved.failed.len(),
            "group done"
        );
        report.moves.merge(moved);
    }

    info!(
        total = report.total,
        groups = groups.len(),
        moved = report.moves.moved.len(),
        failed = report.moves.failed.len(),
        copied = report.moves.copied,
        dry_run = opts.dry_run,
        "slice finished"
    );
    Ok(report)
}
