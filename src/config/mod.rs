//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, path_has_symlink_ancestor, resolve_lenient};
pub use types::{Config, LogLevel};
pub use xml::{load_config_from_xml, load_config_from_xml_path, parse_settings, FileSettings};

/// Files per group when neither the CLI nor the config file sets one.
pub const SLICE_SIZE_DEFAULT: usize = 1024;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "DIRSLICE_CONFIG";
