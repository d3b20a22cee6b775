//! Identity and physical state of an enemy as seen by the world.
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::MOVING_THRESHOLD;

/// Stable identifier for one enemy instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

/// Position and velocity of an agent, owned by the world.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
    /// World position.
    pub position: Vec2,
    /// Velocity applied during the last tick, in units per second.
    pub velocity: Vec2,
    /// Cosmetic facing: `Some(true)` when the sprite should be mirrored.
    pub flip_x: Option<bool>,
}

impl Body {
    /// Creates a body at rest.
    #[must_use]
    pub const fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            flip_x: None,
        }
    }

    /// Whether the body moved faster than [`MOVING_THRESHOLD`] last tick.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.velocity.length() > MOVING_THRESHOLD
    }
}
