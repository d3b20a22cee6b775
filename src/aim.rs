//! Aim direction tracking and the cosmetic facing derived from it.
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::AIM_CHANGE_EPSILON;
use crate::error::{non_negative, ConfigError};
use crate::vector_math::{heading_degrees, lerp_angle_degrees, normalize_or_zero};

/// How a sprite follows the aim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FacingMode {
    /// Mirror horizontally when aiming left.
    #[default]
    Flip,
    /// Turn the body toward the aim heading.
    Rotate {
        /// Interpolation rate per second.
        speed: f32,
    },
}

/// Aim behaviour of an agent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    /// Facing derived from the aim.
    pub facing: FacingMode,
}

impl AimConfig {
    /// Checks the rotation rate.
    ///
    /// # Errors
    /// Returns [`ConfigError::NegativeRange`] for a negative rotation speed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let FacingMode::Rotate { speed } = self.facing {
            non_negative("rotation_speed", speed)?;
        }
        Ok(())
    }
}

/// Facing handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Facing {
    /// Mirror state for flip-style sprites.
    Flip {
        /// Whether the sprite is mirrored.
        flip_x: bool,
    },
    /// Body heading in degrees, counter-clockwise from `+x`.
    Heading(f32),
}

/// Tracks an agent's unit aim direction and reports changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AimTracker {
    direction: Vec2,
    heading: f32,
    mode: FacingMode,
}

impl Default for AimTracker {
    fn default() -> Self {
        Self::new(&AimConfig::default())
    }
}

impl AimTracker {
    /// Creates a tracker aiming along `+x`.
    #[must_use]
    pub const fn new(config: &AimConfig) -> Self {
        Self {
            direction: Vec2::X,
            heading: 0.0,
            mode: config.facing,
        }
    }

    /// Current unit aim direction.
    #[must_use]
    pub const fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Points the aim along `aim`, returning the new direction if it changed.
    ///
    /// A zero or non-finite `aim` keeps the previous direction.
    pub fn update(&mut self, aim: Vec2) -> Option<Vec2> {
        let unit = normalize_or_zero(aim);
        if unit == Vec2::ZERO || 1.0 - unit.dot(self.direction) < AIM_CHANGE_EPSILON {
            return None;
        }
        self.direction = unit;
        Some(unit)
    }

    /// Facing for this tick, turning the body by up to `speed·dt` of the gap
    /// in rotate mode.
    pub fn facing(&mut self, dt: f32) -> Facing {
        match self.mode {
            FacingMode::Flip => Facing::Flip {
                flip_x: self.direction.x < 0.0,
            },
            FacingMode::Rotate { speed } => {
                let target = heading_degrees(self.direction);
                self.heading = lerp_angle_degrees(self.heading, target, speed * dt);
                Facing::Heading(self.heading)
            }
        }
    }
}
