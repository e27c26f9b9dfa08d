//! XML configuration support.
//! - Loads optional settings from config.xml (quick_xml + serde).
//! - A missing file means "use defaults"; nothing is created on the user's behalf.
//! - Unknown fields are rejected so typos surface instead of being ignored.
//!
//! <config>
//!   <slice_size>1024</slice_size>
//!   <log_level>normal</log_level>
//!   <log_file>/path/to/dirslice.log</log_file>
//! </config>

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "slice_size", default, deserialize_with = "de_usize_trimmed_opt")]
    slice_size: Option<usize>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
}

// Trims surrounding whitespace; a blank value counts as absent, anything else must be a number.
fn de_usize_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<usize>().map(Some).map_err(|_| {
            serde::de::Error::custom(format!("invalid slice_size '{s}': expected a positive number"))
        }),
    }
}

/// Settings read from a config file. Every field is optional; unset fields
/// leave the corresponding Config value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSettings {
    pub slice_size: Option<usize>,
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
}

impl FileSettings {
    /// Copy the values that are set into `cfg`.
    pub fn apply_to(&self, cfg: &mut Config) {
        if let Some(size) = self.slice_size {
            cfg.slice_size = size;
        }
        if let Some(level) = self.log_level {
            cfg.log_level = level;
        }
        if let Some(path) = &self.log_file {
            cfg.log_file = Some(path.clone());
        }
    }
}

impl TryFrom<XmlConfig> for FileSettings {
    type Error = anyhow::Error;

    fn try_from(parsed: XmlConfig) -> Result<Self> {
        let log_level = match parsed.log_level.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => Some(s.parse::<LogLevel>().map_err(anyhow::Error::msg)?),
        };
        let log_file = parsed.log_file.as_deref().and_then(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() { None } else { Some(PathBuf::from(trimmed)) }
        });
        Ok(Self {
            slice_size: parsed.slice_size,
            log_level,
            log_file,
        })
    }
}

/// Parse settings from XML text.
pub fn parse_settings(contents: &str) -> Result<FileSettings> {
    let parsed: XmlConfig = from_xml_str(contents).context("parse config xml")?;
    parsed.try_into()
}

/// Load settings from a specific XML file.
pub fn load_config_from_xml_path(path: &Path) -> Result<FileSettings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    parse_settings(&contents).with_context(|| format!("config file '{}'", path.display()))
}

/// Load settings from $DIRSLICE_CONFIG or the default location.
/// Returns Ok(None) when no config file exists there.
pub fn load_config_from_xml() -> Result<Option<FileSettings>> {
    let Some(path) = default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(None);
    }
    load_config_from_xml_path(&path).map(Some)
}
