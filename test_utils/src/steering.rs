//! Builders for steering snapshots and a deterministic noise field.

use glam::Vec2;
use hostile::entity::AgentId;
use hostile::steering::{Neighbor, NoiseSource};

/// Noise field returning the same sample everywhere.
///
/// `FlatNoise(0.5)` makes the wander term vanish.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatNoise(pub f32);

impl NoiseSource for FlatNoise {
    fn sample(&self, _: f32, _: f32) -> f32 {
        self.0
    }
}

/// A stationary neighbour at `(x, y)`.
pub fn neighbor(id: u32, x: f32, y: f32) -> Neighbor {
    neighbor_moving(id, Vec2::new(x, y), Vec2::ZERO)
}

/// A neighbour at `position` moving with `velocity`.
pub const fn neighbor_moving(id: u32, position: Vec2, velocity: Vec2) -> Neighbor {
    Neighbor {
        id: AgentId(id),
        position,
        velocity,
    }
}

/// `count` stationary neighbours evenly spaced on a circle around `centre`.
pub fn ring(count: u16, centre: Vec2, radius: f32) -> Vec<Neighbor> {
    (0..count)
        .map(|i| {
            let angle = std::f32::consts::TAU * f32::from(i) / f32::from(count);
            neighbor_moving(
                u32::from(i) + 1,
                centre + Vec2::from_angle(angle) * radius,
                Vec2::ZERO,
            )
        })
        .collect()
}
