//! Per-tick movement of the car, enemies and boats

use rand::Rng;

use super::level::spawn_boat;
use super::state::{Boat, Car, Enemy, WorldState};
use super::tick::TickInput;
use crate::consts::*;
use crate::heading_vector;
use crate::settings::Arena;

/// Move everything one tick. Returns whether the car was driven.
pub fn advance(world: &mut WorldState, input: &TickInput) -> bool {
    let arena = world.arena;
    let moving = match world.car.as_mut() {
        Some(car) => drive_car(car, input, &arena),
        None => false,
    };
    move_enemies(&mut world.enemies, &arena);
    move_boats(&mut world.boats, &mut world.rng, &arena);
    moving
}

/// Steer and thrust, then clamp into the arena
pub fn drive_car(car: &mut Car, input: &TickInput, arena: &Arena) -> bool {
    if input.left {
        car.angle -= CAR_TURN_RATE;
    }
    if input.right {
        car.angle += CAR_TURN_RATE;
    }
    let forward = heading_vector(car.angle) * car.speed;
    if input.up {
        car.pos += forward;
    }
    if input.down {
        car.pos -= forward * CAR_REVERSE_FACTOR;
    }

    let half = car.size * 0.5;
    // Never panics, even when the arena is smaller than the car
    car.pos.x = car.pos.x.max(half.x).min(arena.width - half.x);
    car.pos.y = car.pos.y.max(half.y).min(arena.height - CAR_BOTTOM_MARGIN);

    input.any()
}

/// Enemies run straight and wrap around to the far side
pub fn move_enemies(enemies: &mut [Enemy], arena: &Arena) {
    let right_exit = arena.width + ENEMY_WRAP_MARGIN;
    for enemy in enemies {
        enemy.pos.x += enemy.speed;
        if enemy.speed > 0.0 && enemy.pos.x > right_exit {
            enemy.pos.x = ENEMY_LEFT_RESPAWN_X;
        } else if enemy.speed < 0.0 && enemy.pos.x < ENEMY_LEFT_RESPAWN_X {
            enemy.pos.x = right_exit;
        }
    }
}

/// Boats drift right and bob; past the right edge they respawn on the left
pub fn move_boats<R: Rng + ?Sized>(boats: &mut [Boat], rng: &mut R, arena: &Arena) {
    for boat in boats {
        boat.pos.x += boat.speed;
        boat.phase += BOAT_BOB_RATE;
        boat.pos.y = boat.lane_y + boat.phase.sin() * BOAT_BOB_AMPLITUDE;

        if boat.pos.x > arena.width + ENEMY_WRAP_MARGIN {
            let fresh = spawn_boat(rng);
            boat.pos = fresh.pos;
            boat.lane_y = fresh.lane_y;
        }
    }
}
