//! Castle Park - A top-down arcade parking game
//!
//! Core modules:
//! - `sim`: Level generation, difficulty, motion and collision (the game core)
//! - `session`: Menu / level / game-complete state machine
//! - `audio`: Audio cue collaborator interface
//! - `input`: Held-direction sampling and discrete key actions
//! - `settings`: Immutable game configuration

pub mod audio;
pub mod error;
pub mod input;
pub mod session;
pub mod settings;
pub mod sim;

pub use audio::{AudioCues, AudioManager, SilentAudio, SoundEffect};
pub use error::{ConfigError, SessionError};
pub use input::{Direction, HeldKeys, InputSource, KeyAction};
pub use session::{SessionController, SessionState};
pub use settings::{Arena, DevOptions, GameConfig};

use glam::Vec2;

/// Game tuning constants
pub mod consts {
    use glam::Vec2;

    /// Car starting pose (center), recreated on every level start
    pub const CAR_START: Vec2 = Vec2::new(120.0, 550.0);
    pub const CAR_SIZE: Vec2 = Vec2::new(48.0, 24.0);
    /// Forward speed in units per tick
    pub const CAR_SPEED: f32 = 2.5;
    /// Heading change per tick while a turn key is held (radians)
    pub const CAR_TURN_RATE: f32 = 0.06;
    /// Reverse moves at a fraction of forward speed
    pub const CAR_REVERSE_FACTOR: f32 = 0.6;
    /// Car may not go lower than this distance from the bottom edge
    pub const CAR_BOTTOM_MARGIN: f32 = 20.0;

    /// Real and decoy spot footprint
    pub const SPOT_SIZE: Vec2 = Vec2::new(40.0, 20.0);
    /// Parking succeeds within this distance of the spot center on both axes
    pub const PARK_TOLERANCE: f32 = 18.0;
    /// ...and with the heading this close to zero (radians)
    pub const PARK_ANGLE_TOLERANCE: f32 = 0.4;

    pub const ENEMY_SIZE: Vec2 = Vec2::new(48.0, 24.0);
    /// An enemy this close to the real spot center (both axes) steals it
    pub const ENEMY_STEAL_DISTANCE: f32 = 20.0;
    /// Enemies moving right wrap once past `arena.width + ENEMY_WRAP_MARGIN`
    pub const ENEMY_WRAP_MARGIN: f32 = 100.0;
    /// Respawn / wrap x-coordinate left of the arena
    pub const ENEMY_LEFT_RESPAWN_X: f32 = -150.0;
    /// Gap between queued enemies at level start
    pub const ENEMY_QUEUE_SPACING: f32 = 150.0;
    /// Vertical band enemies travel in
    pub const ENEMY_BAND: (f32, f32) = (120.0, 480.0);

    pub const BOAT_COUNT: usize = 3;
    pub const BOAT_SIZE: Vec2 = Vec2::new(60.0, 30.0);
    pub const BOAT_SPEED_RANGE: (f32, f32) = (0.8, 1.5);
    pub const BOAT_SPAWN_X_RANGE: (f32, f32) = (-200.0, -100.0);
    pub const BOAT_LANE_RANGE: (f32, f32) = (50.0, 150.0);
    /// Bobbing phase advance per tick
    pub const BOAT_BOB_RATE: f32 = 0.02;
    pub const BOAT_BOB_AMPLITUDE: f32 = 4.0;

    /// Smallest arena that holds the fixed layout: spot tables, obstacle
    /// regions, enemy band, boat lanes and the car start with its bottom margin
    pub const MIN_ARENA: Vec2 = Vec2::new(924.0, 570.0);

    /// Hard floor for difficulty-derived placement padding
    pub const MIN_SAFE_AREA_PADDING: f32 = 5.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Size of the heading's remainder after whole turns, in [0, 2π).
///
/// The remainder keeps the sign of `angle`, so a car turned almost a full
/// circle (either way) is still far from "pointing right".
#[inline]
pub fn heading_deviation(angle: f32) -> f32 {
    (angle % std::f32::consts::TAU).abs()
}

/// Unit vector for a heading
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
