use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Anything that stops the game from getting its first frame up.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot open log file {path}: {source}")]
    Logging {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Raw mode, alternate screen or size query failed.
    #[error("terminal setup failed: {0}")]
    Platform(#[from] io::Error),
}
