//! Runtime configuration, read from an optional TOML file.
//!
//! Every field has a compiled-in default, so a missing file is not an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::input::{Key, KeyBindings};

/// File looked up in the working directory when no override is given.
pub const DEFAULT_CONFIG_FILE: &str = "simple_shooter.toml";
/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "SIMPLE_SHOOTER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub assets: AssetConfig,
    pub controls: ControlConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Requested size in window units.
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Minimum time between presented frames.
    pub frame_interval_ms: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Simple Game".to_string(),
            frame_interval_ms: 16,
        }
    }
}

impl WindowConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub player_sprite: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            player_sprite: PathBuf::from("images/player.png"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    pub fire: Key,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            fire: KeyBindings::default().fire,
        }
    }
}

impl ControlConfig {
    /// Bindings compared against translated key events, so character keys
    /// are folded the same way the terminal folds them.
    pub fn bindings(&self) -> KeyBindings {
        KeyBindings {
            fire: self.fire.normalized(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: PathBuf,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("simple_shooter.log"),
            filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read `path`; a file that does not exist yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content, path),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// The file named by `SIMPLE_SHOOTER_CONFIG`, else `simple_shooter.toml`.
    pub fn path_from_env() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}
