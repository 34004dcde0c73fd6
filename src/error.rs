use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or validating an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("grid size must be at least {min}, got {actual}")]
    GridTooSmall { min: u16, actual: u16 },

    #[error("start cell ({x}, {y}) lies outside a {width}x{height} grid")]
    StartOutOfBounds {
        x: i32,
        y: i32,
        width: u16,
        height: u16,
    },

    #[error("base tick interval must be positive")]
    ZeroInterval,

    #[error("minimum tick interval {min_ms}ms exceeds base interval {base_ms}ms")]
    FloorAboveBase { min_ms: u64, base_ms: u64 },
}

/// Top-level failures surfaced by the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to open log file {}: {source}", path.display())]
    LogFile { path: PathBuf, source: io::Error },

    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
