//! World state and entity types
//!
//! One `WorldState` lives for the whole session. Per-level collections are
//! replaced wholesale on every level (re)generation.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{AxisBox, Rect};
use crate::consts::*;
use crate::settings::Arena;

/// RGB color, cosmetic only
pub type Rgb = [u8; 3];

/// Coarse phase of the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player's name
    #[default]
    Menu,
    /// A level is loaded
    Playing,
}

/// Which hazard ended the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashKind {
    Obstacle,
    Enemy,
    Boat,
    Decoy,
}

/// Notable things that happened during a tick, drained by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Car hit a hazard
    Crash(CrashKind),
    /// An enemy reached the real spot first
    EnemyReachedSpot,
    /// Car parked in the real spot
    Parked,
}

/// The player's car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Heading (radians, 0 = pointing right)
    pub angle: f32,
}

impl Car {
    /// Fresh car at the starting pose
    pub fn at_start() -> Self {
        Self {
            pos: CAR_START,
            size: CAR_SIZE,
            speed: CAR_SPEED,
            angle: 0.0,
        }
    }

    /// Box the car occupies at the starting pose
    pub fn start_box() -> Rect {
        Rect::new(CAR_START, CAR_SIZE)
    }
}

/// The one spot that wins the level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParkingSpot {
    pub pos: Vec2,
    pub size: Vec2,
}

/// A fake spot; parking on it loses the level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FakeParkingSpot {
    pub pos: Vec2,
    pub size: Vec2,
    /// Drawn rotation, not part of the box
    pub angle: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Palm,
    Lamp,
    Car,
}

impl ObstacleKind {
    /// Placement cycles through kinds in this order
    pub const CYCLE: [ObstacleKind; 3] = [ObstacleKind::Palm, ObstacleKind::Lamp, ObstacleKind::Car];

    pub fn size(self) -> Vec2 {
        match self {
            ObstacleKind::Palm | ObstacleKind::Lamp => Vec2::new(20.0, 60.0),
            ObstacleKind::Car => Vec2::new(48.0, 24.0),
        }
    }

    /// Region (x range, y range) the kind is scattered over
    pub fn bounds(self) -> ((f32, f32), (f32, f32)) {
        match self {
            ObstacleKind::Palm => ((200.0, 800.0), (100.0, 400.0)),
            ObstacleKind::Lamp => ((150.0, 850.0), (80.0, 450.0)),
            ObstacleKind::Car => ((100.0, 900.0), (120.0, 480.0)),
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            ObstacleKind::Palm => [0, 255, 0],
            ObstacleKind::Lamp => [255, 255, 0],
            ObstacleKind::Car => [100, 150, 255],
        }
    }
}

/// Static hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
    pub color: Rgb,
}

/// Enemy car racing for the spot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    /// Units per tick; the sign is the travel direction
    pub speed: f32,
    pub color: Rgb,
}

/// Boat drifting along the moat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boat {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub color: Rgb,
    /// Bobbing phase (radians)
    pub phase: f32,
    /// Vertical center the bobbing oscillates around
    pub lane_y: f32,
}

macro_rules! impl_axis_box {
    ($($ty:ty),*) => {
        $(impl AxisBox for $ty {
            fn center(&self) -> Vec2 {
                self.pos
            }

            fn size(&self) -> Vec2 {
                self.size
            }
        })*
    };
}

impl_axis_box!(Car, ParkingSpot, FakeParkingSpot, Obstacle, Enemy, Boat);

/// Complete mutable world (the RNG is not serialized)
#[derive(Debug, Clone, Serialize)]
pub struct WorldState {
    /// Seed the RNG was created from
    pub seed: u64,
    #[serde(skip)]
    pub rng: Pcg32,
    pub arena: Arena,
    pub car: Option<Car>,
    pub parking_spot: Option<ParkingSpot>,
    pub fake_parking_spots: Vec<FakeParkingSpot>,
    pub obstacles: Vec<Obstacle>,
    pub boats: Vec<Boat>,
    pub enemies: Vec<Enemy>,
    /// Current level (1-based)
    pub level: u32,
    pub game_over: bool,
    pub win: bool,
    pub phase: GamePhase,
    pub player_name: String,
    /// Placements this level that ran out of attempts
    pub placement_fallbacks: u32,
    /// Ticks simulated on the current level
    pub level_ticks: u64,
    /// Undrained events
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl WorldState {
    pub fn new(seed: u64, arena: Arena) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena,
            car: None,
            parking_spot: None,
            fake_parking_spots: Vec::new(),
            obstacles: Vec::new(),
            boats: Vec::new(),
            enemies: Vec::new(),
            level: 1,
            game_over: false,
            win: false,
            phase: GamePhase::Menu,
            player_name: String::new(),
            placement_fallbacks: 0,
            level_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Clear per-level collections and terminal flags
    pub fn reset_level(&mut self) {
        self.fake_parking_spots.clear();
        self.obstacles.clear();
        self.boats.clear();
        self.enemies.clear();
        self.game_over = false;
        self.win = false;
        self.placement_fallbacks = 0;
        self.level_ticks = 0;
        self.events.clear();
    }

    /// Back to the menu at level 1 with no player
    pub fn reset_game(&mut self) {
        self.level = 1;
        self.player_name.clear();
        self.phase = GamePhase::Menu;
        self.car = None;
        self.parking_spot = None;
        self.reset_level();
    }

    /// Recreate the car at its starting pose
    pub fn reset_car(&mut self) {
        self.car = Some(Car::at_start());
    }

    /// Either terminal flag is set
    pub fn is_finished(&self) -> bool {
        self.game_over || self.win
    }

    /// Motion and collision run only while this holds
    pub fn is_active(&self, max_levels: u32) -> bool {
        self.phase == GamePhase::Playing && !self.is_finished() && self.level <= max_levels
    }

    /// Latch game over; only the first terminal transition is recorded
    pub fn lose(&mut self, event: GameEvent) -> bool {
        if self.is_finished() {
            return false;
        }
        self.game_over = true;
        self.events.push(event);
        true
    }

    /// Latch the win; ignored once any terminal flag is set
    pub fn park(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.win = true;
        self.events.push(GameEvent::Parked);
        true
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_is_in_menu() {
        let world = WorldState::new(1, Arena::default());
        assert_eq!(world.phase, GamePhase::Menu);
        assert_eq!(world.level, 1);
        assert!(world.car.is_none());
        assert!(world.parking_spot.is_none());
        assert!(!world.is_active(10));
    }

    #[test]
    fn test_terminal_flags_are_exclusive() {
        let mut world = WorldState::new(1, Arena::default());
        world.phase = GamePhase::Playing;
        assert!(world.lose(GameEvent::Crash(CrashKind::Boat)));
        assert!(!world.park());
        assert!(!world.lose(GameEvent::EnemyReachedSpot));
        assert!(world.game_over);
        assert!(!world.win);
        assert_eq!(world.drain_events(), vec![GameEvent::Crash(CrashKind::Boat)]);
        assert!(world.events.is_empty());
    }

    #[test]
    fn test_reset_game_returns_to_menu() {
        let mut world = WorldState::new(1, Arena::default());
        world.phase = GamePhase::Playing;
        world.level = 4;
        world.player_name = "Ada".into();
        world.reset_car();
        world.win = true;
        world.reset_game();
        assert_eq!(world.level, 1);
        assert!(world.player_name.is_empty());
        assert_eq!(world.phase, GamePhase::Menu);
        assert!(world.car.is_none());
        assert!(!world.win);
    }

    #[test]
    fn test_car_reset_pose() {
        let mut world = WorldState::new(1, Arena::default());
        world.reset_car();
        let car = world.car.as_ref().unwrap();
        assert_eq!(car.pos, CAR_START);
        assert_eq!(car.angle, 0.0);
        assert_eq!(car.bounds(), Car::start_box());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut world = WorldState::new(9, Arena::default());
        world.reset_car();
        let json = serde_json::to_string(&world).unwrap();
        assert!(json.contains("\"level\":1"));
        assert!(!json.contains("rng"));
    }
}
