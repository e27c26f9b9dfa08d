//! Config validation logic.
//! Checks the inputs the slicer relies on: an existing source directory, a
//! target that is new or empty and disjoint from the source, and a positive size.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::errors::DirSliceError;
use crate::fs_ops::io_error_with_help;

use super::paths::resolve_lenient;
use super::types::Config;

impl Config {
    /// Validate source, target and slice size without modifying anything.
    pub fn validate(&self) -> Result<()> {
        if self.slice_size == 0 {
            error!(slice_size = self.slice_size, "invalid slice size");
            return Err(DirSliceError::InvalidSliceSize(self.slice_size).into());
        }

        ensure_source_dir(&self.source)?;
        ensure_target_free(&self.target)?;

        let source_real = dunce::canonicalize(&self.source)
            .with_context(|| format!("resolve source '{}'", self.source.display()))?;
        let target_real = resolve_lenient(&self.target);
        if target_real.starts_with(&source_real) {
            error!(source = %source_real.display(), target = %target_real.display(), "target overlaps source");
            return Err(DirSliceError::TargetInsideSource {
                target: self.target.clone(),
                source_dir: self.source.clone(),
            }
            .into());
        }

        info!(
            "Config validated: source='{}' target='{}' slice_size={}",
            self.source.display(),
            self.target.display(),
            self.slice_size
        );
        Ok(())
    }

    /// Create the target directory (and parents) if it does not exist yet.
    pub fn prepare_target(&self) -> Result<()> {
        if self.dry_run {
            debug!(path = %self.target.display(), "dry-run: target not created");
            return Ok(());
        }
        fs::create_dir_all(&self.target)
            .map_err(io_error_with_help("create target directory", &self.target))?;
        Ok(())
    }
}

/// Source must exist and be a directory.
fn ensure_source_dir(path: &Path) -> Result<()> {
    let meta = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            error!("source does not exist: {}", path.display());
            return Err(DirSliceError::SourceNotFound(path.to_path_buf()).into());
        }
        Err(e) => return Err(io_error_with_help("inspect source", path)(e)),
    };
    if !meta.is_dir() {
        error!("source is not a directory: {}", path.display());
        return Err(DirSliceError::SourceNotDirectory(path.to_path_buf()).into());
    }
    fs::read_dir(path).map_err(io_error_with_help("read source directory", path))?;
    debug!("source readable: {}", path.display());
    Ok(())
}

/// Target must either not exist or be an empty directory.
/// A symlink is judged by what it points at.
fn ensure_target_free(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("target will be created: {}", path.display());
            Ok(())
        }
        Err(e) => Err(io_error_with_help("inspect target", path)(e)),
        Ok(meta) if meta.is_dir() => {
            let mut entries =
                fs::read_dir(path).map_err(io_error_with_help("read target directory", path))?;
            if entries.next().is_some() {
                error!("target directory is not empty: {}", path.display());
                return Err(DirSliceError::TargetNotEmpty(path.to_path_buf()).into());
            }
            Ok(())
        }
        Ok(_) => {
            error!("target exists and is not a directory: {}", path.display());
            Err(DirSliceError::TargetNotEmpty(path.to_path_buf()).into())
        }
    }
}
