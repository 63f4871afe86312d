//! Per-level difficulty
//!
//! A level's parameters are base values, scaled linearly by how far past
//! level 1 it is, then patched field-by-field by any manual override for that
//! exact level. Overrides always win.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::MIN_SAFE_AREA_PADDING;

/// Resolved parameters for one level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelDifficulty {
    pub obstacles: u32,
    pub enemies: u32,
    /// Clearance kept around each placed obstacle
    pub safe_area_padding: f32,
    /// Enemy speed magnitude in units per tick
    pub enemy_speed: f32,
    /// Enemies may enter from either side
    pub enemy_direction_random: bool,
}

/// Level 1 values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyBase {
    pub obstacles: u32,
    pub enemies: u32,
    pub safe_area_padding: f32,
    pub enemy_speed: f32,
    pub enemy_direction_random: bool,
}

impl Default for DifficultyBase {
    fn default() -> Self {
        Self {
            obstacles: 8,
            enemies: 2,
            safe_area_padding: 30.0,
            enemy_speed: 1.2,
            enemy_direction_random: false,
        }
    }
}

/// Per-level growth coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyScaling {
    pub obstacle_growth: f32,
    pub enemy_growth: f32,
    pub padding_reduction: f32,
    pub speed_increase: f32,
    /// First level on which enemy direction is randomized
    pub random_direction_level: u32,
}

impl Default for DifficultyScaling {
    fn default() -> Self {
        Self {
            obstacle_growth: 1.0,
            enemy_growth: 0.5,
            padding_reduction: 2.5,
            speed_increase: 0.15,
            random_direction_level: 4,
        }
    }
}

/// Manual replacement values for a single level
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyOverride {
    pub obstacles: Option<u32>,
    pub enemies: Option<u32>,
    pub safe_area_padding: Option<f32>,
    pub enemy_speed: Option<f32>,
    pub enemy_direction_random: Option<bool>,
}

/// Full difficulty model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    pub base: DifficultyBase,
    pub scaling: DifficultyScaling,
    /// Keyed by level number
    pub overrides: BTreeMap<u32, DifficultyOverride>,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            10,
            DifficultyOverride {
                obstacles: Some(16),
                enemies: Some(6),
                ..Default::default()
            },
        );
        Self {
            base: DifficultyBase::default(),
            scaling: DifficultyScaling::default(),
            overrides,
        }
    }
}

impl DifficultyConfig {
    /// Resolve the parameters for `level` (1-based)
    pub fn calculate(&self, level: u32) -> LevelDifficulty {
        let base = &self.base;
        let scaling = &self.scaling;

        let mut difficulty = LevelDifficulty {
            obstacles: base.obstacles,
            enemies: base.enemies,
            safe_area_padding: base.safe_area_padding,
            enemy_speed: base.enemy_speed,
            enemy_direction_random: base.enemy_direction_random,
        };

        if level > 1 {
            let m = (level - 1) as f32;
            difficulty.obstacles = scaled_count(base.obstacles, scaling.obstacle_growth, m);
            difficulty.enemies = scaled_count(base.enemies, scaling.enemy_growth, m);
            difficulty.safe_area_padding = (base.safe_area_padding
                - scaling.padding_reduction * m)
                .max(MIN_SAFE_AREA_PADDING);
            difficulty.enemy_speed = base.enemy_speed + scaling.speed_increase * m;
            difficulty.enemy_direction_random = level >= scaling.random_direction_level;
        }

        if let Some(o) = self.overrides.get(&level) {
            if let Some(v) = o.obstacles {
                difficulty.obstacles = v;
            }
            if let Some(v) = o.enemies {
                difficulty.enemies = v;
            }
            if let Some(v) = o.safe_area_padding {
                difficulty.safe_area_padding = v;
            }
            if let Some(v) = o.enemy_speed {
                difficulty.enemy_speed = v;
            }
            if let Some(v) = o.enemy_direction_random {
                difficulty.enemy_direction_random = v;
            }
        }

        log::debug!("Level {level} difficulty: {difficulty:?}");
        difficulty
    }

    pub fn obstacle_count(&self, level: u32) -> u32 {
        self.calculate(level).obstacles
    }

    pub fn enemy_count(&self, level: u32) -> u32 {
        self.calculate(level).enemies
    }

    pub fn safe_area_padding(&self, level: u32) -> f32 {
        self.calculate(level).safe_area_padding
    }

    pub fn enemy_speed(&self, level: u32) -> f32 {
        self.calculate(level).enemy_speed
    }

    pub fn randomize_enemy_direction(&self, level: u32) -> bool {
        self.calculate(level).enemy_direction_random
    }

    /// One-line description used by the dev overlay and balancing output
    pub fn summary(&self, level: u32) -> String {
        let d = self.calculate(level);
        format!(
            "Level {level}: {} obstacles, {} enemies, {}px padding, {:.1}x speed, random dir: {}",
            d.obstacles, d.enemies, d.safe_area_padding, d.enemy_speed, d.enemy_direction_random
        )
    }

    /// Summaries for levels 1..=max_levels
    pub fn preview_progression(&self, max_levels: u32) -> Vec<String> {
        (1..=max_levels).map(|level| self.summary(level)).collect()
    }
}

/// Base count plus linear growth, rounded half away from zero, never negative
fn scaled_count(base: u32, growth: f32, levels_past_first: f32) -> u32 {
    (base as f32 + growth * levels_past_first).round().max(0.0) as u32
}
