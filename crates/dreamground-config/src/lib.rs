//! Configuration file handling for dreamground.
//!
//! Settings live in `config.toml` under the platform config directory. Every
//! field has a default, so a missing file or a partial one is valid.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use dreamground_core::{RenderSettings, RippleSettings, SceneKind, StarrySettings, WaveSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE: &str = "config.toml";

/// Errors from reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no home directory to place the configuration in")]
    NoConfigDir,
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// View shown at startup.
    pub scene: SceneKind,
    /// Draw the clock overlay.
    pub show_clock: bool,
    pub render: RenderSettings,
    pub ripple: RippleSettings,
    pub wave: WaveSettings,
    pub starry: StarrySettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scene: SceneKind::default(),
            show_clock: true,
            render: RenderSettings::default(),
            ripple: RippleSettings::default(),
            wave: WaveSettings::default(),
            starry: StarrySettings::default(),
        }
    }
}

impl Config {
    /// Platform directories for dreamground.
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "dreamground")
    }

    /// Location of the configuration file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Self::project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded config from {}", path.display());
        Ok(config.sanitized())
    }

    /// Bound sizes and replace non-finite numbers with their defaults.
    pub fn sanitized(self) -> Self {
        Self {
            ripple: self.ripple.sanitized(),
            wave: self.wave.sanitized(),
            starry: self.starry.sanitized(),
            ..self
        }
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text).map_err(io_err)
    }

    /// Pause between frames.
    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.render.refresh_interval_ms.max(1))
    }
}
