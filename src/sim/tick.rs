//! Per-frame simulation step
//!
//! The host calls [`tick`] once per frame. Motion runs first, then collision;
//! nothing happens once a terminal flag is set.

use super::collision::{self, Verdict};
use super::motion;
use super::state::WorldState;
use crate::input::{Direction, InputSource};

/// Held directions sampled at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Turn counter-clockwise
    pub left: bool,
    /// Turn clockwise
    pub right: bool,
    /// Thrust forward
    pub up: bool,
    /// Reverse
    pub down: bool,
}

impl TickInput {
    /// Snapshot the four directions from an input source
    pub fn sample(source: &impl InputSource) -> Self {
        Self {
            left: source.is_direction_held(Direction::Left),
            right: source.is_direction_held(Direction::Right),
            up: source.is_direction_held(Direction::Up),
            down: source.is_direction_held(Direction::Down),
        }
    }

    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// What a single tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The simulation actually advanced
    pub simulated: bool,
    /// The car was driven
    pub car_moving: bool,
    pub verdict: Option<Verdict>,
}

/// Advance the world by one frame
pub fn tick(world: &mut WorldState, input: &TickInput, max_levels: u32) -> TickOutcome {
    if !world.is_active(max_levels) {
        return TickOutcome::default();
    }

    world.level_ticks += 1;
    let car_moving = motion::advance(world, input);
    let verdict = collision::evaluate(world);
    if let Some(verdict) = verdict {
        log::info!(
            "Level {} ended after {} ticks: {:?}",
            world.level,
            world.level_ticks,
            verdict
        );
    }

    TickOutcome {
        simulated: true,
        car_moving,
        verdict,
    }
}
