//! Configuration management for ungraft.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Ungraft configuration loaded from .git/ungraft.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// File name within the git directory.
    pub const FILE_NAME: &'static str = "ungraft.toml";

    /// Load config from a TOML file.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    /// Returns error if file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::ConfigParseError {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load config from the given git directory.
    ///
    /// # Errors
    /// Returns error if the file exists but can't be read or parsed.
    pub fn load_from_git_dir(git_dir: impl AsRef<Path>) -> Result<Self> {
        Self::load(git_dir.as_ref().join(Self::FILE_NAME))
    }
}

/// General ungraft settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Never rewrite the shallow file, only report.
    #[serde(default)]
    pub dry_run: bool,
}

/// Terminal output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Suppress informational output.
    #[serde(default)]
    pub quiet: bool,
}
