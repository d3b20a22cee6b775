//! Three-band controller that holds an agent at an optimal distance.
//!
//! Output is deliberately unsmoothed: heavy units sample it at fixed
//! intervals and commit to whichever band they are in.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{non_negative, ConfigError};

/// Distance band the agent currently occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    /// Target beyond the follow range; the agent stands still.
    OutOfRange,
    /// Farther than the dead-band; close the gap.
    Approach,
    /// Inside the dead-band; hold position.
    Hold,
    /// Nearer than the dead-band; back off.
    Retreat,
}

/// Engagement distances for an approach/retreat agent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApproachRetreatConfig {
    /// Beyond this distance the agent disengages.
    pub follow_range: f32,
    /// Preferred distance from the target.
    pub optimal_distance: f32,
    /// Half-width of the dead-band around `optimal_distance`.
    pub tolerance: f32,
}

impl Default for ApproachRetreatConfig {
    fn default() -> Self {
        Self {
            follow_range: 25.0,
            optimal_distance: 12.0,
            tolerance: 1.0,
        }
    }
}

impl ApproachRetreatConfig {
    /// Checks that every distance is finite and non-negative.
    ///
    /// # Errors
    /// Returns the first offending distance as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("follow_range", self.follow_range)?;
        non_negative("optimal_distance", self.optimal_distance)?;
        non_negative("tolerance", self.tolerance)?;
        Ok(())
    }

    /// Movement vector for a target at `distance` along `direction`.
    #[must_use]
    pub fn solve(&self, distance: f32, direction: Vec2) -> Vec2 {
        solve(
            distance,
            direction,
            self.optimal_distance,
            self.tolerance,
            self.follow_range,
        )
    }
}

/// Classifies `distance` against the follow range and dead-band.
#[must_use]
pub fn classify(distance: f32, optimal_distance: f32, tolerance: f32, follow_range: f32) -> Band {
    if distance > follow_range {
        Band::OutOfRange
    } else if distance > optimal_distance + tolerance {
        Band::Approach
    } else if distance < optimal_distance - tolerance {
        Band::Retreat
    } else {
        Band::Hold
    }
}

/// Movement vector holding the agent at `optimal_distance ± tolerance`.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use hostile::steering::approach_retreat;
/// assert_eq!(approach_retreat(20.0, Vec2::X, 12.0, 1.0, 25.0), Vec2::X);
/// assert_eq!(approach_retreat(10.0, Vec2::X, 12.0, 1.0, 25.0), Vec2::NEG_X);
/// assert_eq!(approach_retreat(12.0, Vec2::X, 12.0, 1.0, 25.0), Vec2::ZERO);
/// assert_eq!(approach_retreat(30.0, Vec2::X, 12.0, 1.0, 25.0), Vec2::ZERO);
/// ```
#[must_use]
pub fn solve(
    distance: f32,
    direction: Vec2,
    optimal_distance: f32,
    tolerance: f32,
    follow_range: f32,
) -> Vec2 {
    match classify(distance, optimal_distance, tolerance, follow_range) {
        Band::Approach => direction,
        Band::Retreat => -direction,
        Band::OutOfRange | Band::Hold => Vec2::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::far(26.0, Band::OutOfRange)]
    #[case::at_follow_range(25.0, Band::Approach)]
    #[case::upper_edge(13.0, Band::Hold)]
    #[case::lower_edge(11.0, Band::Hold)]
    #[case::close(5.0, Band::Retreat)]
    fn bands_follow_boundaries(#[case] distance: f32, #[case] expected: Band) {
        assert_eq!(classify(distance, 12.0, 1.0, 25.0), expected);
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let config = ApproachRetreatConfig {
            tolerance: -0.5,
            ..ApproachRetreatConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
