//! Level generation
//!
//! Order matters: each stage is checked for overlap against the stages placed
//! before it (spot, then decoys, then obstacles). Boats and enemies are
//! scattered without checks.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::difficulty::LevelDifficulty;
use super::geometry::{AxisBox, Rect, overlaps};
use super::placement::{SpatialPlacer, uniform_in};
use super::state::{
    Boat, Car, Enemy, FakeParkingSpot, Obstacle, ObstacleKind, ParkingSpot, WorldState,
};
use crate::consts::*;
use crate::settings::GameConfig;

/// Real spot positions, picked in order by level
pub const PARKING_SPOTS: [Vec2; 11] = [
    Vec2::new(850.0, 150.0),
    Vec2::new(850.0, 250.0),
    Vec2::new(850.0, 350.0),
    Vec2::new(750.0, 120.0),
    Vec2::new(750.0, 220.0),
    Vec2::new(750.0, 320.0),
    Vec2::new(650.0, 150.0),
    Vec2::new(650.0, 250.0),
    Vec2::new(650.0, 350.0),
    Vec2::new(550.0, 180.0),
    Vec2::new(550.0, 280.0),
];

/// Decoy templates (position, drawn angle); a level uses a prefix of this list
pub const DECOY_TEMPLATES: [(Vec2, f32); 8] = [
    (Vec2::new(850.0, 200.0), 0.3),
    (Vec2::new(750.0, 180.0), -0.2),
    (Vec2::new(650.0, 200.0), 0.4),
    (Vec2::new(550.0, 220.0), -0.3),
    (Vec2::new(800.0, 300.0), 0.1),
    (Vec2::new(700.0, 280.0), -0.4),
    (Vec2::new(600.0, 300.0), 0.2),
    (Vec2::new(500.0, 320.0), -0.1),
];

const ENEMY_COLOR: [u8; 3] = [255, 50, 50];

/// Populate `world` for `level`, replacing every per-level collection
pub fn generate_level(world: &mut WorldState, config: &GameConfig, level: u32) {
    world.reset_level();
    world.level = level;

    let difficulty = config.difficulty.calculate(level);

    let spot = parking_spot_for_level(level);
    world.parking_spot = Some(spot);

    world.fake_parking_spots = decoys_for_level(level, &spot, config.decoy_padding);

    place_obstacles(world, config, &difficulty);

    let arena_width = world.arena.width;
    world.boats = (0..BOAT_COUNT).map(|_| spawn_boat(&mut world.rng)).collect();
    world.enemies = spawn_enemies(&mut world.rng, &difficulty, arena_width);

    log::info!(
        "Level {}: spot at ({}, {}), {} decoys, {} obstacles, {} boats, {} enemies",
        level,
        spot.pos.x,
        spot.pos.y,
        world.fake_parking_spots.len(),
        world.obstacles.len(),
        world.boats.len(),
        world.enemies.len()
    );
    if world.placement_fallbacks > 0 {
        log::warn!(
            "Level {}: {} obstacle placements exhausted their attempts and may overlap",
            level,
            world.placement_fallbacks
        );
    }
}

/// The real spot is a fixed function of the level
pub fn parking_spot_for_level(level: u32) -> ParkingSpot {
    let index = (level.saturating_sub(1) as usize) % PARKING_SPOTS.len();
    ParkingSpot {
        pos: PARKING_SPOTS[index],
        size: SPOT_SIZE,
    }
}

/// First `min(level + 1, templates)` decoys, minus any crowding the spot or car start
pub fn decoys_for_level(level: u32, spot: &ParkingSpot, padding: f32) -> Vec<FakeParkingSpot> {
    let wanted = (level as usize + 1).min(DECOY_TEMPLATES.len());
    let car_start = Car::start_box();

    DECOY_TEMPLATES
        .iter()
        .take(wanted)
        .map(|&(pos, angle)| FakeParkingSpot {
            pos,
            size: SPOT_SIZE,
            angle,
        })
        .filter(|decoy| !overlaps(decoy, spot, padding) && !overlaps(decoy, &car_start, padding))
        .collect()
}

fn place_obstacles(world: &mut WorldState, config: &GameConfig, difficulty: &LevelDifficulty) {
    let placer = SpatialPlacer::new(config.placement_attempts, difficulty.safe_area_padding);

    // Spot, decoys and car start, then each obstacle as it lands
    let mut occupied: Vec<Rect> = Vec::with_capacity(difficulty.obstacles as usize + 10);
    if let Some(spot) = &world.parking_spot {
        occupied.push(spot.bounds());
    }
    occupied.extend(world.fake_parking_spots.iter().map(|decoy| decoy.bounds()));
    occupied.push(Car::start_box());

    for i in 0..difficulty.obstacles as usize {
        let kind = ObstacleKind::CYCLE[i % ObstacleKind::CYCLE.len()];
        let (x_range, y_range) = kind.bounds();
        let placed = placer.place(&mut world.rng, kind.size(), &occupied, |rng| {
            uniform_in(rng, x_range, y_range)
        });
        if placed.exhausted {
            world.placement_fallbacks += 1;
        }
        occupied.push(placed.rect);
        world.obstacles.push(Obstacle {
            pos: placed.rect.center,
            size: placed.rect.size,
            kind,
            color: kind.color(),
        });
    }
}

/// Boat somewhere left of the arena, heading right
pub fn spawn_boat<R: Rng + ?Sized>(rng: &mut R) -> Boat {
    let lane_y = rng.random_range(BOAT_LANE_RANGE.0..BOAT_LANE_RANGE.1);
    Boat {
        pos: Vec2::new(
            rng.random_range(BOAT_SPAWN_X_RANGE.0..BOAT_SPAWN_X_RANGE.1),
            lane_y,
        ),
        size: BOAT_SIZE,
        speed: rng.random_range(BOAT_SPEED_RANGE.0..BOAT_SPEED_RANGE.1),
        color: [
            rng.random_range(100..200),
            rng.random_range(50..150),
            rng.random_range(200..=255),
        ],
        phase: rng.random_range(0.0..TAU),
        lane_y,
    }
}

/// Enemies queue up off-screen; with random direction each picks a side
fn spawn_enemies<R: Rng + ?Sized>(
    rng: &mut R,
    difficulty: &LevelDifficulty,
    arena_width: f32,
) -> Vec<Enemy> {
    (0..difficulty.enemies)
        .map(|i| {
            let queue_offset = ENEMY_QUEUE_SPACING * i as f32;
            let from_right = difficulty.enemy_direction_random && rng.random_bool(0.5);
            let (x, speed) = if from_right {
                (
                    arena_width + ENEMY_WRAP_MARGIN + queue_offset,
                    -difficulty.enemy_speed,
                )
            } else {
                (ENEMY_LEFT_RESPAWN_X - queue_offset, difficulty.enemy_speed)
            };
            Enemy {
                pos: Vec2::new(x, rng.random_range(ENEMY_BAND.0..ENEMY_BAND.1)),
                size: ENEMY_SIZE,
                speed,
                color: ENEMY_COLOR,
            }
        })
        .collect()
}
