//! Mapty configuration.
//!
//! Loaded from `~/.mapty/config.toml`. Every key is optional; a missing
//! file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::map::DEFAULT_ZOOM;
use crate::model::Coordinates;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("zoom-level must be between 1 and 19 in {0}")]
    Zoom(PathBuf),
}

/// Mapty configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Zoom used when opening the map and when jumping to a workout.
    pub zoom_level: u8,

    /// Where the map opens when no `--at` is given, as `[lat, lng]`.
    pub position: Option<Coordinates>,

    /// Directory holding the saved workout list.
    /// Defaults to `~/.mapty/storage/`.
    pub storage_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zoom_level: DEFAULT_ZOOM,
            position: None,
            storage_dir: None,
        }
    }
}

impl Config {
    /// Load config from `~/.mapty/config.toml`, or defaults if there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if !(1..=19).contains(&config.zoom_level) {
            return Err(ConfigError::Zoom(path.to_path_buf()));
        }

        Ok(config)
    }

    /// The config file path: `~/.mapty/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".mapty").join("config.toml"))
    }
}
