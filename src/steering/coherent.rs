//! Seedable coherent noise used to give each agent a smooth wander.
use std::fmt;

use noise::{NoiseFn, Perlin};

use crate::numeric::narrow_f64;

/// Smooth scalar field sampled at 2D coordinates.
///
/// Samples should lie roughly in `[0, 1]` and vary continuously with the
/// input, so that steering driven by them never jumps between ticks.
pub trait NoiseSource: Send {
    /// Samples the field at `(x, y)`.
    fn sample(&self, x: f32, y: f32) -> f32;
}

/// Perlin noise remapped from `[-1, 1]` into `[0, 1]`.
#[derive(Clone)]
pub struct PerlinNoise {
    seed: u32,
    perlin: Perlin,
}

impl fmt::Debug for PerlinNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerlinNoise")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl PerlinNoise {
    /// Creates a field whose shape is fixed by `seed`.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            perlin: Perlin::new(seed),
        }
    }

    /// Seed the field was built from.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, x: f32, y: f32) -> f32 {
        let raw = self.perlin.get([f64::from(x), f64::from(y)]);
        narrow_f64(raw.mul_add(0.5, 0.5).clamp(0.0, 1.0))
    }
}
