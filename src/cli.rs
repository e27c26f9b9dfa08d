//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - SOURCE and TARGET are required unless --print-config is given.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::types::{Config, LogLevel};

/// Split a large directory tree into name-ranged subdirectories.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Move all files of SOURCE into TARGET, split into subdirectories of at most --size files"
)]
pub struct Args {
    /// Directory whose files are redistributed (searched recursively, dot files skipped).
    #[arg(
        value_name = "SOURCE",
        value_hint = ValueHint::DirPath,
        required_unless_present = "print_config"
    )]
    pub source: Option<PathBuf>,

    /// Empty directory or new location that receives the files.
    #[arg(
        value_name = "TARGET",
        value_hint = ValueHint::DirPath,
        required_unless_present = "print_config"
    )]
    pub target: Option<PathBuf>,

    /// Number of files per directory.
    #[arg(
        long,
        short = 's',
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Number of files per directory [default: 1024]"
    )]
    pub size: Option<u64>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(
        long,
        value_name = "LEVEL",
        value_parser = LogLevel::from_str,
        help = "Set log level: quiet, normal, info, debug"
    )]
    pub log_level: Option<LogLevel>,

    /// Also write logs to this file.
    #[arg(long, value_hint = ValueHint::FilePath, help = "Append logs to this file")]
    pub log_file: Option<PathBuf>,

    /// Print where dirslice will look for the config file, then exit.
    #[arg(long, help = "Print the config file location used by dirslice and exit")]
    pub print_config: bool,

    /// Dry-run: print the plan but do not modify the filesystem.
    #[arg(
        long,
        help = "Show what would be moved where, but do not modify files/directories"
    )]
    pub dry_run: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(src) = &self.source {
            cfg.source = src.clone();
        }
        if let Some(dst) = &self.target {
            cfg.target = dst.clone();
        }
        if let Some(size) = self.size {
            cfg.slice_size = usize::try_from(size).unwrap_or(usize::MAX);
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(path) = &self.log_file {
            cfg.log_file = Some(path.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
