//! Game configuration
//!
//! Supplied once at construction time and never mutated by the core. Loaded
//! from JSON by native hosts; every field has a default so partial documents
//! are accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MIN_ARENA;
use crate::error::ConfigError;
use crate::sim::DifficultyConfig;

/// Logical play area (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    /// Whether the fixed level layout fits inside this arena
    pub fn holds_layout(&self) -> bool {
        self.width >= MIN_ARENA.x && self.height >= MIN_ARENA.y
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 700.0,
        }
    }
}

/// Development switches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevOptions {
    /// Master switch for all other dev options
    pub development: bool,
    /// Skip the name prompt and start playing immediately
    pub skip_home_if_dev: bool,
    /// Dev overlay visible at startup
    pub show_dev_ui: bool,
    /// Start with audio cues disabled
    pub disable_audio_in_dev: bool,
    /// Level to start on instead of 1
    pub auto_start_level: Option<u32>,
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena: Arena,
    /// Levels to clear before the game is complete
    pub max_levels: u32,
    /// Rejection-sampling budget per placed obstacle
    pub placement_attempts: u32,
    /// Clearance used when dropping decoys that crowd the real spot
    pub decoy_padding: f32,
    /// Fixed RNG seed (random per session when absent)
    pub seed: Option<u64>,
    pub difficulty: DifficultyConfig,
    pub dev: DevOptions,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            max_levels: 10,
            placement_attempts: 50,
            decoy_padding: 15.0,
            seed: None,
            difficulty: DifficultyConfig::default(),
            dev: DevOptions::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Like [`GameConfig::load`], but falls back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default config");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_levels == 0 {
            return Err(ConfigError::Invalid("max_levels must be at least 1".into()));
        }
        if !(self.arena.width > 0.0 && self.arena.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "arena must have positive size, got {}x{}",
                self.arena.width, self.arena.height
            )));
        }
        if !self.arena.holds_layout() {
            return Err(ConfigError::Invalid(format!(
                "arena {}x{} is smaller than the level layout ({}x{})",
                self.arena.width, self.arena.height, MIN_ARENA.x, MIN_ARENA.y
            )));
        }
        if self.placement_attempts == 0 {
            return Err(ConfigError::Invalid(
                "placement_attempts must be at least 1".into(),
            ));
        }
        if let Some(level) = self.dev.auto_start_level {
            if level == 0 || level > self.max_levels {
                return Err(ConfigError::Invalid(format!(
                    "auto_start_level {level} outside 1..={}",
                    self.max_levels
                )));
            }
        }
        Ok(())
    }

    /// Level a fresh session starts on
    pub fn start_level(&self) -> u32 {
        self.dev.auto_start_level.unwrap_or(1)
    }

    /// Dev shortcut: skip the menu entirely
    pub fn skips_menu(&self) -> bool {
        self.dev.development && self.dev.skip_home_if_dev
    }

    /// Whether audio cues start enabled
    pub fn audio_enabled_at_start(&self) -> bool {
        !(self.dev.development && self.dev.disable_audio_in_dev)
    }
}
