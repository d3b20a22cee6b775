//! Target-independent drift with a vertical wave.
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{finite, non_negative, ConfigError};

/// Horizontal travel direction of a pattern mover.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalDirection {
    /// Travel toward `-x`.
    Left,
    /// Travel toward `+x`.
    #[default]
    Right,
}

impl HorizontalDirection {
    /// `-1` for left, `+1` for right.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Drift speed and wave shape for a pattern mover.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Initial travel direction.
    pub direction: HorizontalDirection,
    /// Horizontal speed in units per second.
    pub speed: f32,
    /// Whether the vertical wave is applied at all.
    pub oscillate: bool,
    /// Peak vertical displacement of the integrated path.
    pub amplitude: f32,
    /// Angular frequency of the wave, in radians per second.
    pub frequency: f32,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            direction: HorizontalDirection::Right,
            speed: 3.0,
            oscillate: true,
            amplitude: 2.0,
            frequency: 1.0,
        }
    }
}

impl PatternConfig {
    /// Checks speed and wave parameters.
    ///
    /// # Errors
    /// Returns the first offending value as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("pattern_speed", self.speed)?;
        non_negative("pattern_amplitude", self.amplitude)?;
        finite("pattern_frequency", self.frequency)?;
        Ok(())
    }

    /// Largest speed the pattern can reach.
    #[must_use]
    pub fn peak_speed(&self) -> f32 {
        let wave = if self.oscillate {
            self.amplitude * self.frequency.abs()
        } else {
            0.0
        };
        self.speed.hypot(wave)
    }
}

/// Velocity at `time` for a mover drifting along `direction`.
///
/// The vertical component is the derivative of `amplitude·sin(time·frequency)`,
/// so the integrated path oscillates with no velocity jump at the peaks.
///
/// # Examples
/// ```
/// use hostile::steering::{pattern_velocity, HorizontalDirection};
/// let v = pattern_velocity(HorizontalDirection::Left, 3.0, 0.0, 2.0, 1.0);
/// assert!((v.x + 3.0).abs() < 1e-6);
/// assert!((v.y - 2.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn solve(
    direction: HorizontalDirection,
    speed: f32,
    time: f32,
    amplitude: f32,
    frequency: f32,
) -> Vec2 {
    Vec2::new(
        direction.sign() * speed,
        (time * frequency).cos() * amplitude * frequency,
    )
}

/// Stateful pattern mover with its own wave clock.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternMotion {
    config: PatternConfig,
    direction: HorizontalDirection,
    elapsed: f32,
}

impl PatternMotion {
    /// Creates a mover at the start of its wave.
    #[must_use]
    pub const fn new(config: PatternConfig) -> Self {
        Self {
            direction: config.direction,
            config,
            elapsed: 0.0,
        }
    }

    /// Advances the wave clock by `dt` and returns the new velocity.
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        self.elapsed += dt;
        let amplitude = if self.config.oscillate {
            self.config.amplitude
        } else {
            0.0
        };
        solve(
            self.direction,
            self.config.speed,
            self.elapsed,
            amplitude,
            self.config.frequency,
        )
    }

    /// Current travel direction.
    #[must_use]
    pub const fn direction(&self) -> HorizontalDirection {
        self.direction
    }

    /// Cosmetic facing hint: sprites mirror while travelling left.
    #[must_use]
    pub const fn facing_left(&self) -> bool {
        matches!(self.direction, HorizontalDirection::Left)
    }

    /// Flips the travel direction.
    pub fn reverse(&mut self) {
        self.direction = self.direction.reversed();
    }

    /// Restarts the wave and restores the configured direction.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.direction = self.config.direction;
    }

    /// Largest speed this mover can reach.
    #[must_use]
    pub fn peak_speed(&self) -> f32 {
        self.config.peak_speed()
    }
}
