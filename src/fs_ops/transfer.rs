//! Single-file move.
//! Attempts an atomic rename; on a cross-filesystem error falls back to
//! copy into a hidden temp sibling, rename into place, then remove the original.
//!
//! Notes:
//! - Symlinks are recreated as links pointing at the same target; regular files are copied.
//! - If the original cannot be removed after the copy landed, the copy is removed
//!   again and the move fails, leaving the file only at its source.
//! - If that rollback fails too, the error says the file now exists in both places.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, warn};

use super::helpers::{io_error_with_help, is_cross_device};
use crate::platform::copy_symlink;

/// How a file reached its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMethod {
    Renamed,
    Copied,
}

/// Move `src` to `dst`. `dst` is expected not to exist.
pub fn move_file(src: &Path, dst: &Path) -> Result<MoveMethod> {
    match fs::rename(src, dst) {
        Ok(()) => Ok(MoveMethod::Renamed),
        Err(e) if is_cross_device(&e) => {
            warn!(src = %src.display(), dst = %dst.display(), "cross-filesystem move; copying instead");
            copy_then_remove(src, dst)?;
            Ok(MoveMethod::Copied)
        }
        Err(e) => Err(io_error_with_help("move file", src)(e))
            .with_context(|| format!("destination '{}'", dst.display())),
    }
}

fn temp_sibling(dst: &Path) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let name = format!(".dirslice.{}.{}.tmp", std::process::id(), nanos);
    dst.with_file_name(name)
}

/// Copy `src` to `tmp` without following a symlink at `src`.
fn copy_entry(src: &Path, tmp: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(src).map_err(io_error_with_help("inspect file", src))?;
    if meta.file_type().is_symlink() {
        copy_symlink(src, tmp).map_err(io_error_with_help("recreate symlink", src))?;
    } else {
        fs::copy(src, tmp).map_err(io_error_with_help("copy file", src))?;
    }
    Ok(())
}

fn copy_then_remove(src: &Path, dst: &Path) -> Result<()> {
    copy_then_remove_with(src, dst, |p| fs::remove_file(p))
}

fn copy_then_remove_with<F>(src: &Path, dst: &Path, remove_src: F) -> Result<()>
where
    F: FnOnce(&Path) -> io::Result<()>,
{
    let tmp = temp_sibling(dst);
    if let Err(e) = copy_entry(src, &tmp) {
        let _ = fs::remove_file(&tmp);
        return Err(e.context(format!("temporary file '{}'", tmp.display())));
    }

    if let Err(e) = fs::rename(&tmp, dst) {
        let _ = fs::remove_file(&tmp);
        return Err(io_error_with_help("rename temporary file into place", dst)(e));
    }
    debug!(tmp = %tmp.display(), dst = %dst.display(), "copied across filesystems");

    if let Err(e) = remove_src(src) {
        let cause = io_error_with_help("remove original file", src)(e);
        return match fs::remove_file(dst) {
            Ok(()) => Err(cause.context(format!("copy at '{}' removed again", dst.display()))),
            Err(rollback) => {
                error!(src = %src.display(), dst = %dst.display(), error = %rollback, "file left at source and destination");
                Err(cause.context(format!(
                    "could not remove copy at '{}' ({rollback}); file exists at both paths",
                    dst.display()
                )))
            }
        };
    }
    Ok(())
}
