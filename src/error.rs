//! Error types for the few fallible edges of the game
//!
//! The simulation itself never fails; only configuration loading and the
//! menu's player-name check can be rejected.

use std::path::PathBuf;

use thiserror::Error;

/// Rejections surfaced to the presentation layer by the session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Start was requested without a player name
    #[error("please enter your driver name")]
    EmptyPlayerName,
}

/// Failures while loading or validating a [`crate::GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
