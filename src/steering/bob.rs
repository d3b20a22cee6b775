//! Cosmetic vertical bobbing for floating enemies.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{non_negative, ConfigError};

/// Shape of the bob applied to a floating sprite.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BobConfig {
    /// Peak vertical offset of the sprite.
    pub amplitude: f32,
    /// Base angular frequency in radians per second.
    pub frequency: f32,
    /// Each agent perturbs its frequency once by up to this much.
    pub frequency_jitter: f32,
}

impl Default for BobConfig {
    fn default() -> Self {
        Self {
            amplitude: 0.5,
            frequency: 2.0,
            frequency_jitter: 0.3,
        }
    }
}

impl BobConfig {
    /// Checks that amplitude and jitter are non-negative.
    ///
    /// # Errors
    /// Returns the first offending value as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("bob_amplitude", self.amplitude)?;
        non_negative("bob_frequency", self.frequency)?;
        non_negative("bob_frequency_jitter", self.frequency_jitter)?;
        Ok(())
    }
}

/// Per-agent bob clock producing a sprite offset each tick.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatBob {
    amplitude: f32,
    frequency: f32,
    phase: f32,
    timer: f32,
}

impl FloatBob {
    /// Creates a bob with a jittered frequency and the given `phase`.
    pub fn new<R: Rng + ?Sized>(config: &BobConfig, phase: f32, rng: &mut R) -> Self {
        let jitter = if config.frequency_jitter > 0.0 {
            rng.gen_range(-config.frequency_jitter..=config.frequency_jitter)
        } else {
            0.0
        };
        Self {
            amplitude: config.amplitude,
            frequency: config.frequency + jitter,
            phase,
            timer: 0.0,
        }
    }

    /// Advances the clock by `dt` and returns the vertical sprite offset.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.timer += dt * self.frequency;
        (self.timer + self.phase).sin() * self.amplitude
    }

    /// Frequency after the per-agent jitter.
    #[must_use]
    pub const fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Returns the bob to the start of its cycle.
    pub fn reset(&mut self) {
        self.timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn offset_stays_within_amplitude() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut bob = FloatBob::new(&BobConfig::default(), 0.7, &mut rng);
        for _ in 0..300 {
            assert!(bob.advance(0.05).abs() <= 0.5 + f32::EPSILON);
        }
    }

    #[test]
    fn jitter_is_bounded() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let bob = FloatBob::new(&BobConfig::default(), 0.0, &mut rng);
            assert!((1.7..=2.3).contains(&bob.frequency()));
        }
    }

    #[test]
    fn reset_restarts_cycle() {
        let mut rng = StdRng::seed_from_u64(2);
        let config = BobConfig {
            frequency_jitter: 0.0,
            ..BobConfig::default()
        };
        let mut bob = FloatBob::new(&config, 0.0, &mut rng);
        let first = bob.advance(0.1);
        bob.advance(0.4);
        bob.reset();
        assert!((bob.advance(0.1) - first).abs() < f32::EPSILON);
    }
}
