//! Game core
//!
//! Everything that decides what happens in a level lives here:
//! - Difficulty resolution and level generation
//! - Rejection-sampled placement
//! - Per-tick motion and collision
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod geometry;
pub mod level;
pub mod motion;
pub mod placement;
pub mod state;
pub mod tick;

pub use collision::Verdict;
pub use difficulty::{
    DifficultyBase, DifficultyConfig, DifficultyOverride, DifficultyScaling, LevelDifficulty,
};
pub use geometry::{AxisBox, Rect, overlaps};
pub use level::generate_level;
pub use placement::{Placement, SpatialPlacer};
pub use state::{
    Boat, Car, CrashKind, Enemy, FakeParkingSpot, GameEvent, GamePhase, Obstacle, ObstacleKind,
    ParkingSpot, WorldState,
};
pub use tick::{TickInput, TickOutcome, tick};
