//! Simple 2D arena answering ray queries for the demo world.
//!
//! The target is a circle on [`Layer::PLAYER`]; walls are line segments on
//! [`Layer::LEVEL`]. An arena without walls is an open field.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sight::{Layer, LayerMask, LineOfSight, RayHit};
use crate::vector_math::normalize_or_zero;

const PARALLEL_EPSILON: f32 = 1e-6;

/// A wall segment that blocks sight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// First endpoint.
    pub start: Vec2,
    /// Second endpoint.
    pub end: Vec2,
}

impl Wall {
    /// Distance along a unit ray to the segment, if it is struck.
    #[must_use]
    pub fn intersect(&self, origin: Vec2, direction: Vec2) -> Option<f32> {
        let span = self.end - self.start;
        let denom = direction.perp_dot(span);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let offset = self.start - origin;
        let t = offset.perp_dot(span) / denom;
        let u = offset.perp_dot(direction) / denom;
        (t >= 0.0 && (0.0..=1.0).contains(&u)).then_some(t)
    }
}

/// Target circle plus blocking walls.
#[derive(Clone, Debug, PartialEq)]
pub struct Arena {
    target: Vec2,
    target_radius: f32,
    walls: Vec<Wall>,
}

impl Arena {
    /// Arena with no obstructions.
    #[must_use]
    pub const fn open_field(target: Vec2, target_radius: f32) -> Self {
        Self {
            target,
            target_radius,
            walls: Vec::new(),
        }
    }

    /// Arena with the given walls.
    #[must_use]
    pub const fn with_walls(target: Vec2, target_radius: f32, walls: Vec<Wall>) -> Self {
        Self {
            target,
            target_radius,
            walls,
        }
    }

    /// Centre of the target.
    #[must_use]
    pub const fn target(&self) -> Vec2 {
        self.target
    }

    /// Moves the target.
    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Blocking walls.
    #[must_use]
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    fn target_hit(&self, origin: Vec2, direction: Vec2) -> Option<f32> {
        let offset = origin - self.target;
        let b = offset.dot(direction);
        let c = offset.length_squared() - self.target_radius * self.target_radius;
        if c > 0.0 && b > 0.0 {
            return None;
        }
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        Some((-b - discriminant.sqrt()).max(0.0))
    }
}

impl LineOfSight for Arena {
    fn ray(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let heading = normalize_or_zero(direction);
        if heading == Vec2::ZERO {
            return None;
        }
        let target = mask
            .contains(Layer::PLAYER)
            .then(|| self.target_hit(origin, heading))
            .flatten()
            .map(|distance| RayHit {
                layer: Layer::PLAYER,
                distance,
            });
        let walls = self
            .walls
            .iter()
            .filter(|_| mask.contains(Layer::LEVEL))
            .filter_map(|wall| wall.intersect(origin, heading))
            .map(|distance| RayHit {
                layer: Layer::LEVEL,
                distance,
            });
        target
            .into_iter()
            .chain(walls)
            .filter(|hit| hit.distance <= max_distance)
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::sight::has_line_of_sight;

    fn both() -> LayerMask {
        LayerMask::of(Layer::PLAYER).with(LayerMask::of(Layer::LEVEL))
    }

    #[test]
    fn ray_reaches_target_surface() {
        let arena = Arena::open_field(Vec2::new(10.0, 0.0), 1.0);
        let hit = arena
            .ray(Vec2::ZERO, Vec2::X, 20.0, both())
            .expect("target should be hit");
        assert_eq!(hit.layer, Layer::PLAYER);
        assert_relative_eq!(hit.distance, 9.0, epsilon = 1e-5);
    }

    #[test]
    fn wall_in_front_blocks_sight() {
        let wall = Wall {
            start: Vec2::new(5.0, -2.0),
            end: Vec2::new(5.0, 2.0),
        };
        let arena = Arena::with_walls(Vec2::new(10.0, 0.0), 1.0, vec![wall]);
        assert!(!has_line_of_sight(
            &arena,
            Vec2::ZERO,
            Vec2::X,
            20.0,
            LayerMask::of(Layer::PLAYER),
            LayerMask::of(Layer::LEVEL),
        ));
    }

    #[test]
    fn wall_off_to_the_side_is_ignored() {
        let wall = Wall {
            start: Vec2::new(5.0, 3.0),
            end: Vec2::new(5.0, 6.0),
        };
        let arena = Arena::with_walls(Vec2::new(10.0, 0.0), 1.0, vec![wall]);
        let hit = arena.ray(Vec2::ZERO, Vec2::X, 20.0, both());
        assert_eq!(hit.map(|h| h.layer), Some(Layer::PLAYER));
    }

    #[test]
    fn target_beyond_range_is_missed() {
        let arena = Arena::open_field(Vec2::new(30.0, 0.0), 1.0);
        assert!(arena.ray(Vec2::ZERO, Vec2::X, 20.0, both()).is_none());
    }

    #[test]
    fn target_behind_is_missed() {
        let arena = Arena::open_field(Vec2::new(-10.0, 0.0), 1.0);
        assert!(arena.ray(Vec2::ZERO, Vec2::X, 20.0, both()).is_none());
    }
}
