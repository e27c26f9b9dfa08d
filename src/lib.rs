//! Core library for `dirslice`.
//!
//! Moves every visible file of a directory tree into a target directory,
//! split into subdirectories of bounded size named after the first and last
//! file they hold (e.g. `a-c`, `d-e`).
//!
//! Layout:
//! - `slicer`: collection, partitioning, naming and relocation
//! - `fs_ops`: single-file moves and I/O error helpers
//! - `config`, `cli`: settings from XML and command line
//! - `output`, `shutdown`, `platform`: process-level plumbing

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;
pub mod shutdown;
pub mod slicer;

pub use config::{
    default_config_path, load_config_from_xml, load_config_from_xml_path,
    path_has_symlink_ancestor, Config, FileSettings, LogLevel, CONFIG_ENV, SLICE_SIZE_DEFAULT,
};
pub use errors::DirSliceError;
pub use slicer::{
    collect, compute_groups, relocate, slice_dir, slice_dir_with, uniquify, FileLocation, Group,
    NameSet, RelocateReport, SliceOptions, SliceReport,
};
