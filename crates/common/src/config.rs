//! Configuration loading from YAML files
//!
//! Settings that would otherwise be repeated on every command line live in an
//! `apimd.yaml` next to the documents:
//!
//! ```yaml
//! render:
//!   numbering: false
//! output:
//!   directory: docs
//!   file_name: API.md
//! ```

use crate::{ApimdError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File names probed by [`Config::discover`], in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["apimd.yaml", "apimd.yml"];

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Markdown rendering switches
    pub render: RenderOptions,
    /// Where rendered files go when no explicit path is given
    pub output: OutputConfig,
}

/// Markdown rendering switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Prefix endpoint headings with their 1-based position
    pub numbering: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { numbering: true }
    }
}

/// Output file placement
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for generated Markdown (stdout when unset)
    pub directory: Option<PathBuf>,
    /// File name used inside `directory`
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_name: "API.md".to_string(),
        }
    }
}

impl OutputConfig {
    /// Full output path, if a directory is configured
    pub fn target_path(&self) -> Option<PathBuf> {
        self.directory
            .as_ref()
            .map(|dir| dir.join(&self.file_name))
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ApimdError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| {
            ApimdError::Config(format!(
                "Failed to parse config YAML from {:?}: {}",
                path, e
            ))
        })
    }

    /// Look for a config file in `dir`, falling back to defaults
    pub fn discover(dir: &Path) -> Result<Self> {
        match CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
        {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }
}
