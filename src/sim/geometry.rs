//! Axis-aligned box geometry shared by placement and collision
//!
//! Every entity is a center point plus a full size. Rotation is cosmetic and
//! never affects the box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Anything that occupies an axis-aligned box in the arena
pub trait AxisBox {
    /// Center of the box
    fn center(&self) -> Vec2;
    /// Full width and height
    fn size(&self) -> Vec2;

    fn half_extents(&self) -> Vec2 {
        self.size() * 0.5
    }

    /// Detached copy of the box
    fn bounds(&self) -> Rect {
        Rect::new(self.center(), self.size())
    }
}

/// Plain centered rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.size * 0.5
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.size * 0.5
    }
}

impl AxisBox for Rect {
    fn center(&self) -> Vec2 {
        self.center
    }

    fn size(&self) -> Vec2 {
        self.size
    }
}

/// Box overlap test with `padding` added around `candidate` only
///
/// Boxes that merely touch count as overlapping.
pub fn overlaps(candidate: &impl AxisBox, other: &impl AxisBox, padding: f32) -> bool {
    let a_half = candidate.half_extents() + Vec2::splat(padding);
    let a_min = candidate.center() - a_half;
    let a_max = candidate.center() + a_half;

    let b_half = other.half_extents();
    let b_min = other.center() - b_half;
    let b_max = other.center() + b_half;

    !(a_max.x < b_min.x || a_min.x > b_max.x || a_max.y < b_min.y || a_min.y > b_max.y)
}
