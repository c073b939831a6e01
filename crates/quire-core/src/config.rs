//! Workspace configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory markdown exports and print pages are written to
    pub export_dir: PathBuf,
    /// Title prefix for documents that arrive without a name
    pub placeholder_title: String,
    /// Entries kept by the log viewer before the oldest are dropped
    pub log_capacity: usize,
    /// Hand print pages to the platform browser
    pub open_print_view: bool,
}

impl Config {
    pub fn new(export_dir: PathBuf) -> Self {
        Self {
            export_dir,
            placeholder_title: "BRD".to_string(),
            log_capacity: 500,
            open_print_view: true,
        }
    }

    pub fn export_dir() -> PathBuf {
        dirs::download_dir()
            .map(|d| d.join("Quire"))
            .unwrap_or_else(|| PathBuf::from("quire-exports"))
    }

    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&raw)?;

        if config.log_capacity == 0 {
            return Err(CoreError::Config(
                "log_capacity must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::export_dir())
    }
}
