//! Win / loss detection
//!
//! Hazards are checked before parking, so a car that crashes and parks on the
//! same tick loses. The first terminal transition sticks until the level is
//! regenerated.

use super::geometry::{AxisBox, overlaps};
use super::state::{CrashKind, GameEvent, ParkingSpot, WorldState};
use crate::consts::*;
use crate::heading_deviation;

/// Terminal transition produced by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Lost(GameEvent),
    Won,
}

/// Run every predicate in order and latch the first verdict into `world`
pub fn evaluate(world: &mut WorldState) -> Option<Verdict> {
    if world.is_finished() {
        return None;
    }
    let verdict = detect_loss(world)
        .map(Verdict::Lost)
        .or_else(|| is_parked(world).then_some(Verdict::Won))?;

    match verdict {
        Verdict::Lost(event) => world.lose(event),
        Verdict::Won => world.park(),
    };
    Some(verdict)
}

/// First hazard condition that holds this tick
pub fn detect_loss(world: &WorldState) -> Option<GameEvent> {
    let (Some(car), Some(spot)) = (&world.car, &world.parking_spot) else {
        return None;
    };

    if world.obstacles.iter().any(|o| overlaps(car, o, 0.0)) {
        return Some(GameEvent::Crash(CrashKind::Obstacle));
    }
    for enemy in &world.enemies {
        if overlaps(car, enemy, 0.0) {
            return Some(GameEvent::Crash(CrashKind::Enemy));
        }
        if enemy_reached_spot(enemy, spot) {
            return Some(GameEvent::EnemyReachedSpot);
        }
    }
    if world.boats.iter().any(|b| overlaps(car, b, 0.0)) {
        return Some(GameEvent::Crash(CrashKind::Boat));
    }
    if world.fake_parking_spots.iter().any(|d| overlaps(car, d, 0.0)) {
        return Some(GameEvent::Crash(CrashKind::Decoy));
    }
    None
}

/// Enemy center within the steal distance of the spot center on both axes
pub fn enemy_reached_spot(enemy: &impl AxisBox, spot: &ParkingSpot) -> bool {
    let d = (enemy.center() - spot.pos).abs();
    d.x < ENEMY_STEAL_DISTANCE && d.y < ENEMY_STEAL_DISTANCE
}

/// Car centered on the real spot and facing (roughly) right, whole turns aside
pub fn is_parked(world: &WorldState) -> bool {
    let (Some(car), Some(spot)) = (&world.car, &world.parking_spot) else {
        return false;
    };
    let d = (car.pos - spot.pos).abs();
    d.x < PARK_TOLERANCE
        && d.y < PARK_TOLERANCE
        && heading_deviation(car.angle) < PARK_ANGLE_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Arena;
    use crate::sim::state::{Boat, Enemy, FakeParkingSpot, GamePhase, Obstacle, ObstacleKind};
    use glam::Vec2;

    /// Playing world with a car and spot but no hazards
    fn bare_world() -> WorldState {
        let mut world = WorldState::new(1, Arena::default());
        world.phase = GamePhase::Playing;
        world.reset_car();
        world.parking_spot = Some(ParkingSpot {
            pos: Vec2::new(850.0, 150.0),
            size: SPOT_SIZE,
        });
        world
    }

    fn park_car(world: &mut WorldState, offset: Vec2, angle: f32) {
        let spot = world.parking_spot.unwrap();
        let car = world.car.as_mut().unwrap();
        car.pos = spot.pos + offset;
        car.angle = angle;
    }

    #[test]
    fn test_missing_entities_are_ignored() {
        let mut world = WorldState::new(1, Arena::default());
        assert_eq!(evaluate(&mut world), None);
        world.reset_car();
        assert_eq!(evaluate(&mut world), None);
        assert!(!world.game_over && !world.win);
    }

    #[test]
    fn test_park_at_center_wins() {
        let mut world = bare_world();
        park_car(&mut world, Vec2::ZERO, 0.0);
        assert_eq!(evaluate(&mut world), Some(Verdict::Won));
        assert!(world.win);
        assert!(!world.game_over);
        assert_eq!(world.drain_events(), vec![GameEvent::Parked]);
    }

    #[test]
    fn test_park_tolerance_boundary() {
        let mut world = bare_world();
        park_car(&mut world, Vec2::new(19.0, 0.0), 0.0);
        assert_eq!(evaluate(&mut world), None);
        assert!(!world.win);

        park_car(&mut world, Vec2::new(17.0, -17.0), 0.0);
        assert_eq!(evaluate(&mut world), Some(Verdict::Won));
    }

    #[test]
    fn test_park_requires_alignment() {
        let mut world = bare_world();
        park_car(&mut world, Vec2::ZERO, 0.5);
        assert!(!is_parked(&world));
        park_car(&mut world, Vec2::ZERO, -0.39);
        assert!(is_parked(&world));
        // A full extra turn still counts as facing right
        park_car(&mut world, Vec2::ZERO, std::f32::consts::TAU + 0.1);
        assert!(is_parked(&world));
    }

    #[test]
    fn test_nearly_full_turn_does_not_park() {
        let mut world = bare_world();
        park_car(&mut world, Vec2::ZERO, std::f32::consts::TAU - 0.1);
        assert!(!is_parked(&world));
        park_car(&mut world, Vec2::ZERO, -(std::f32::consts::TAU - 0.1));
        assert!(!is_parked(&world));
        assert_eq!(evaluate(&mut world), None);
        assert!(!world.win);
    }

    #[test]
    fn test_obstacle_crash() {
        let mut world = bare_world();
        world.obstacles.push(Obstacle {
            pos: CAR_START + Vec2::new(30.0, 0.0),
            size: ObstacleKind::Palm.size(),
            kind: ObstacleKind::Palm,
            color: ObstacleKind::Palm.color(),
        });
        assert_eq!(
            evaluate(&mut world),
            Some(Verdict::Lost(GameEvent::Crash(CrashKind::Obstacle)))
        );
        assert!(world.game_over);
    }

    #[test]
    fn test_enemy_crash_and_steal() {
        let mut world = bare_world();
        world.enemies.push(Enemy {
            pos: Vec2::new(860.0, 160.0),
            size: ENEMY_SIZE,
            speed: 1.0,
            color: [255, 50, 50],
        });
        assert_eq!(
            evaluate(&mut world),
            Some(Verdict::Lost(GameEvent::EnemyReachedSpot))
        );

        let mut world = bare_world();
        world.enemies.push(Enemy {
            pos: CAR_START,
            size: ENEMY_SIZE,
            speed: 1.0,
            color: [255, 50, 50],
        });
        assert_eq!(
            evaluate(&mut world),
            Some(Verdict::Lost(GameEvent::Crash(CrashKind::Enemy)))
        );
    }

    #[test]
    fn test_enemy_near_but_outside_steal_distance() {
        let spot = ParkingSpot {
            pos: Vec2::new(500.0, 200.0),
            size: SPOT_SIZE,
        };
        let near = |offset: Vec2| Enemy {
            pos: spot.pos + offset,
            size: ENEMY_SIZE,
            speed: 1.0,
            color: [255, 50, 50],
        };
        assert!(enemy_reached_spot(&near(Vec2::new(19.0, -19.0)), &spot));
        assert!(!enemy_reached_spot(&near(Vec2::new(20.0, 0.0)), &spot));
    }

    #[test]
    fn test_boat_and_decoy_crash() {
        let mut world = bare_world();
        world.boats.push(Boat {
            pos: CAR_START,
            size: BOAT_SIZE,
            speed: 1.0,
            color: [0, 0, 255],
            phase: 0.0,
            lane_y: CAR_START.y,
        });
        assert_eq!(
            evaluate(&mut world),
            Some(Verdict::Lost(GameEvent::Crash(CrashKind::Boat)))
        );

        let mut world = bare_world();
        world.fake_parking_spots.push(FakeParkingSpot {
            pos: CAR_START + Vec2::new(0.0, 15.0),
            size: SPOT_SIZE,
            angle: 0.3,
        });
        assert_eq!(
            evaluate(&mut world),
            Some(Verdict::Lost(GameEvent::Crash(CrashKind::Decoy)))
        );
    }

    #[test]
    fn test_crash_beats_parking_on_same_tick() {
        let mut world = bare_world();
        park_car(&mut world, Vec2::ZERO, 0.0);
        world.obstacles.push(Obstacle {
            pos: world.parking_spot.unwrap().pos,
            size: ObstacleKind::Lamp.size(),
            kind: ObstacleKind::Lamp,
            color: ObstacleKind::Lamp.color(),
        });
        assert!(matches!(evaluate(&mut world), Some(Verdict::Lost(_))));
        assert!(world.game_over);
        assert!(!world.win);
    }

    #[test]
    fn test_verdict_latches() {
        let mut world = bare_world();
        park_car(&mut world, Vec2::ZERO, 0.0);
        assert_eq!(evaluate(&mut world), Some(Verdict::Won));
        // A hazard appearing later has no effect
        world.enemies.push(Enemy {
            pos: CAR_START,
            size: ENEMY_SIZE,
            speed: 1.0,
            color: [255, 50, 50],
        });
        world.car.as_mut().unwrap().pos = CAR_START;
        assert_eq!(evaluate(&mut world), None);
        assert!(world.win);
        assert!(!world.game_over);
    }
}
