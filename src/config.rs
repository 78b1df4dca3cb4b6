// Settings management
// Defaults, overlaid by an optional JSON file, overlaid by command-line flags

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli_output::OutputMode;
use crate::error::{GroupError, Result};
use crate::grouping::BucketOrder;
use crate::input::Separator;
use crate::key::KeyKind;

/// Inputs at or above this many items derive keys in parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub key: KeyKind,
    pub order: BucketOrder,
    pub separator: Separator,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputMode>,
    pub parallel_threshold: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key: KeyKind::Length,
            order: BucketOrder::Key,
            separator: Separator::Whitespace,
            format: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Values given on the command line; `None` leaves the file value in place
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub key: Option<KeyKind>,
    pub order: Option<BucketOrder>,
    pub separator: Option<Separator>,
    pub format: Option<OutputMode>,
}

impl Settings {
    /// Load from `explicit` if given, else the default config file if it
    /// exists, else built-in defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::config_file_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| GroupError::Input {
            path: path.to_path_buf(),
            source: err,
        })?;
        let settings: Settings =
            serde_json::from_str(&content).map_err(|err| GroupError::Config {
                path: path.to_path_buf(),
                source: err,
            })?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(key) = overrides.key {
            self.key = key;
        }
        if let Some(order) = overrides.order {
            self.order = order;
        }
        if let Some(separator) = overrides.separator {
            self.separator = separator;
        }
        if overrides.format.is_some() {
            self.format = overrides.format;
        }
        self
    }

    /// Resolved output mode, auto-detected when unset
    pub fn output_mode(&self) -> OutputMode {
        self.format.unwrap_or_else(OutputMode::auto)
    }

    /// Get the config file path
    pub fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|dir| dir.join("namebuckets").join("config.json"))
    }
}
