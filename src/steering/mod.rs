//! Motion solvers turning a per-tick snapshot into a movement vector.
//!
//! Each solver is independent of the others; an agent owns exactly one of
//! them, selected through [`MotionConfig`].

mod approach;
mod bob;
mod coherent;
mod context;
mod flocking;
mod pattern;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub use approach::{classify, solve as approach_retreat, ApproachRetreatConfig, Band};
pub use bob::{BobConfig, FloatBob};
pub use coherent::{NoiseSource, PerlinNoise};
pub use context::{Neighbor, SteeringContext};
pub use flocking::{
    alignment, cohesion, combine, noise_term, separation, seek, FlockingConfig, FlockingSolver,
    FlockingWeights,
};
pub use pattern::{solve as pattern_velocity, HorizontalDirection, PatternConfig, PatternMotion};

/// Selects the motion solver an agent is built with.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MotionConfig {
    /// Seek the target while flocking with nearby peers.
    Flocking(FlockingConfig),
    /// Hold an optimal distance band from the target.
    ApproachRetreat(ApproachRetreatConfig),
    /// Drift horizontally with a vertical wave, ignoring the target.
    Pattern(PatternConfig),
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self::Flocking(FlockingConfig::default())
    }
}

impl MotionConfig {
    /// Validates the selected solver's settings.
    ///
    /// # Errors
    /// Propagates the solver's own validation failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Flocking(config) => config.validate(),
            Self::ApproachRetreat(config) => config.validate(),
            Self::Pattern(config) => config.validate(),
        }
    }

    /// Radius of the neighbour query this solver needs, if it uses peers.
    #[must_use]
    pub fn neighbor_radius(&self) -> Option<f32> {
        match self {
            Self::Flocking(config) => Some(config.query_radius()),
            Self::ApproachRetreat(_) | Self::Pattern(_) => None,
        }
    }
}
