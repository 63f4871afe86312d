//! Rejection-sampling placement of boxes in the arena
//!
//! Candidates are drawn until one clears every existing box by `padding`, up
//! to a fixed attempt budget. When the budget runs out the last candidate is
//! accepted anyway; the caller learns about it through [`Placement::exhausted`].

use glam::Vec2;
use rand::Rng;

use super::geometry::{AxisBox, Rect, overlaps};

/// Outcome of a single placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub rect: Rect,
    /// Candidates drawn, including the accepted one
    pub attempts: u32,
    /// Budget ran out and `rect` may overlap something
    pub exhausted: bool,
}

/// Bounded rejection sampler
#[derive(Debug, Clone, Copy)]
pub struct SpatialPlacer {
    pub max_attempts: u32,
    pub padding: f32,
}

impl SpatialPlacer {
    pub fn new(max_attempts: u32, padding: f32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            padding,
        }
    }

    /// Place a box of `size` at a position drawn by `sample`, clear of `existing`
    pub fn place<R, F>(
        &self,
        rng: &mut R,
        size: Vec2,
        existing: &[Rect],
        mut sample: F,
    ) -> Placement
    where
        R: Rng + ?Sized,
        F: FnMut(&mut R) -> Vec2,
    {
        let mut rect = Rect::new(sample(rng), size);
        let mut attempts = 1;

        loop {
            if self.is_clear(&rect, existing) {
                return Placement {
                    rect,
                    attempts,
                    exhausted: false,
                };
            }
            if attempts >= self.max_attempts {
                return Placement {
                    rect,
                    attempts,
                    exhausted: true,
                };
            }
            rect = Rect::new(sample(rng), size);
            attempts += 1;
        }
    }

    /// True when `candidate` (inflated by padding) touches none of `existing`
    pub fn is_clear(&self, candidate: &impl AxisBox, existing: &[Rect]) -> bool {
        existing
            .iter()
            .all(|other| !overlaps(candidate, other, self.padding))
    }
}

/// Uniform position inside `x_range` × `y_range`
pub fn uniform_in<R: Rng + ?Sized>(rng: &mut R, x_range: (f32, f32), y_range: (f32, f32)) -> Vec2 {
    Vec2::new(
        rng.random_range(x_range.0..x_range.1),
        rng.random_range(y_range.0..y_range.1),
    )
}
