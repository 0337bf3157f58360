use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::state::layout::ChartLayout;
use crate::state::theme::Theme;

pub const VERSION: &str = "0.1.0";

/// Optional settings file, looked up in the working directory.
pub const CONFIG_FILE: &str = "censusplot.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV loaded at startup.
    pub data_path: PathBuf,
    pub layout: ChartLayout,
    pub theme: Theme,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/data.csv"),
            layout: ChartLayout::default(),
            theme: Theme::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read the settings file. A missing file means defaults; an unreadable
    /// or malformed one is logged and also falls back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    tracing::info!("Loaded settings from {:?}", path);
                    config
                }
                Err(e) => {
                    tracing::warn!("Ignoring malformed settings file {:?}: {e}", path);
                    Self::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!("Cannot read settings file {:?}: {e}", path);
                Self::default()
            }
        }
    }
}
