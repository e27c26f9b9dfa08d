//! Typed error definitions for dirslice.
//! A small set of well-known failure modes with stable codes for logs and exit status.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirSliceError {
    #[error("Source path not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Source is not a directory: {0}")]
    SourceNotDirectory(PathBuf),

    #[error("Target exists and is not an empty directory: {0}")]
    TargetNotEmpty(PathBuf),

    #[error("Target {target} must not be the source or lie inside it ({source_dir})")]
    TargetInsideSource { target: PathBuf, source_dir: PathBuf },

    #[error("Slice size must be a positive number, got {0}")]
    InvalidSliceSize(usize),

    #[error("Operation interrupted by user")]
    Interrupted,

    #[error("{failed} of {total} files could not be moved")]
    PartialMove { failed: usize, total: usize },
}

impl DirSliceError {
    /// Stable numeric code; also used as the process exit status.
    pub fn code(&self) -> i32 {
        match self {
            DirSliceError::SourceNotFound(_) => 2,
            DirSliceError::SourceNotDirectory(_) => 3,
            DirSliceError::TargetNotEmpty(_) => 4,
            DirSliceError::TargetInsideSource { .. } => 5,
            DirSliceError::InvalidSliceSize(_) => 6,
            DirSliceError::Interrupted => 130,
            DirSliceError::PartialMove { .. } => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let all = [
            DirSliceError::SourceNotFound(PathBuf::new()),
            DirSliceError::SourceNotDirectory(PathBuf::new()),
            DirSliceError::TargetNotEmpty(PathBuf::new()),
            DirSliceError::TargetInsideSource {
                target: PathBuf::new(),
                source_dir: PathBuf::new(),
            },
            DirSliceError::InvalidSliceSize(0),
            DirSliceError::Interrupted,
            DirSliceError::PartialMove { failed: 1, total: 2 },
        ];
        let mut codes: Vec<_> = all.iter().map(DirSliceError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn partial_move_message() {
        let e = DirSliceError::PartialMove { failed: 2, total: 9 };
        assert_eq!(e.to_string(), "2 of 9 files could not be moved");
    }
}
