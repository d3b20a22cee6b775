//! Seek plus separation, alignment, cohesion and noise, blended and smoothed.
//!
//! Each term is exposed as a free function so callers can inspect the
//! contributions individually. [`FlockingSolver`] owns the only mutable state:
//! the smoothed velocity and the per-agent noise phase.

use std::fmt;

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};

use super::coherent::NoiseSource;
use super::context::SteeringContext;
use crate::constants::{NOISE_TIME_SCALE, SEEK_MIN_DISTANCE, SEPARATION_MIN_DISTANCE};
use crate::error::{non_negative, ConfigError};
use crate::numeric::mean;
use crate::vector_math::{clamp_unit, exp_smooth, normalize_or_zero};

/// Relative strength of each flocking term. Seek always has weight one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockingWeights {
    /// Weight of the push away from crowded neighbours.
    pub separation: f32,
    /// Weight of matching the neighbours' heading.
    pub alignment: f32,
    /// Weight of the pull toward the neighbours' centroid.
    pub cohesion: f32,
    /// Weight of the per-agent wander.
    pub noise: f32,
}

impl Default for FlockingWeights {
    fn default() -> Self {
        Self {
            separation: 2.0,
            alignment: 0.5,
            cohesion: 0.3,
            noise: 0.2,
        }
    }
}

/// Ranges, smoothing and weights for a flocking agent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockingConfig {
    /// Seek only engages while the target is closer than this.
    pub follow_range: f32,
    /// Neighbours closer than this push the agent away.
    pub separation_range: f32,
    /// Neighbours closer than this contribute to alignment and cohesion.
    pub neighbor_radius: f32,
    /// Rate, per second, at which the output velocity approaches the blend.
    pub movement_smoothing: f32,
    /// Blend weights.
    pub weights: FlockingWeights,
}

impl Default for FlockingConfig {
    fn default() -> Self {
        Self {
            follow_range: 15.0,
            separation_range: 3.0,
            neighbor_radius: 5.0,
            movement_smoothing: 5.0,
            weights: FlockingWeights::default(),
        }
    }
}

impl FlockingConfig {
    /// Checks every range, rate and weight for sign and finiteness.
    ///
    /// # Errors
    /// Returns the first offending setting as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("follow_range", self.follow_range)?;
        non_negative("separation_range", self.separation_range)?;
        non_negative("neighbor_radius", self.neighbor_radius)?;
        non_negative("movement_smoothing", self.movement_smoothing)?;
        non_negative("separation_weight", self.weights.separation)?;
        non_negative("alignment_weight", self.weights.alignment)?;
        non_negative("cohesion_weight", self.weights.cohesion)?;
        non_negative("noise_weight", self.weights.noise)?;
        Ok(())
    }

    /// Radius a world query must cover to feed every term.
    #[must_use]
    pub fn query_radius(&self) -> f32 {
        self.neighbor_radius.max(self.separation_range)
    }
}

/// Target direction while `SEEK_MIN_DISTANCE < distance < follow_range`.
#[must_use]
pub fn seek(context: &SteeringContext<'_>, follow_range: f32) -> Vec2 {
    let distance = context.target_distance;
    if distance > SEEK_MIN_DISTANCE && distance < follow_range {
        context.target_direction
    } else {
        Vec2::ZERO
    }
}

/// Unit push away from neighbours inside `range`.
///
/// Each neighbour contributes the unit vector away from it divided by its
/// distance, so nearer neighbours push harder. The mean of those
/// contributions is renormalised. Coincident neighbours are skipped.
#[must_use]
pub fn separation(context: &SteeringContext<'_>, range: f32) -> Vec2 {
    let (sum, count) = context
        .neighbors
        .iter()
        .filter_map(|neighbor| {
            let away = context.position - neighbor.position;
            let distance = away.length();
            (distance > SEPARATION_MIN_DISTANCE && distance < range)
                .then(|| away / (distance * distance))
        })
        .fold((Vec2::ZERO, 0_usize), |(acc, n), push| (acc + push, n + 1));
    mean(sum, count).map_or(Vec2::ZERO, normalize_or_zero)
}

/// Unit heading of the mean neighbour velocity inside `radius`.
#[must_use]
pub fn alignment(context: &SteeringContext<'_>, radius: f32) -> Vec2 {
    let (sum, count) = within(context, radius)
        .fold((Vec2::ZERO, 0_usize), |(acc, n), neighbor| {
            (acc + neighbor.velocity, n + 1)
        });
    mean(sum, count).map_or(Vec2::ZERO, normalize_or_zero)
}

/// Unit vector toward the centroid of neighbours inside `radius`.
#[must_use]
pub fn cohesion(context: &SteeringContext<'_>, radius: f32) -> Vec2 {
    let (sum, count) = within(context, radius)
        .fold((Vec2::ZERO, 0_usize), |(acc, n), neighbor| {
            (acc + neighbor.position, n + 1)
        });
    mean(sum, count).map_or(Vec2::ZERO, |centroid| {
        normalize_or_zero(centroid - context.position)
    })
}

/// Unit wander direction from two decorrelated noise samples.
///
/// `phase` shifts the sampling time so agents sharing a noise field still
/// wander differently.
#[must_use]
pub fn noise_term(noise: &dyn NoiseSource, time: f32, phase: f32) -> Vec2 {
    let t = time.mul_add(NOISE_TIME_SCALE, phase);
    normalize_or_zero(Vec2::new(
        noise.sample(t, 0.0) - 0.5,
        noise.sample(0.0, t) - 0.5,
    ))
}

/// Weighted blend of the individual terms, capped at unit length.
#[must_use]
pub fn combine(
    seek: Vec2,
    separation: Vec2,
    alignment: Vec2,
    cohesion: Vec2,
    noise: Vec2,
    weights: &FlockingWeights,
) -> Vec2 {
    clamp_unit(
        seek + separation * weights.separation
            + alignment * weights.alignment
            + cohesion * weights.cohesion
            + noise * weights.noise,
    )
}

fn within<'a>(
    context: &SteeringContext<'a>,
    radius: f32,
) -> impl Iterator<Item = &'a super::Neighbor> + 'a {
    let origin = context.position;
    context
        .neighbors
        .iter()
        .filter(move |neighbor| origin.distance(neighbor.position) < radius)
}

/// Stateful flocking steering for one agent.
pub struct FlockingSolver {
    config: FlockingConfig,
    phase: f32,
    velocity: Vec2,
    noise: Box<dyn NoiseSource>,
}

impl fmt::Debug for FlockingSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlockingSolver")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("velocity", &self.velocity)
            .finish_non_exhaustive()
    }
}

impl FlockingSolver {
    /// Creates a solver at rest with the given noise `phase`.
    #[must_use]
    pub fn new(config: FlockingConfig, phase: f32, noise: Box<dyn NoiseSource>) -> Self {
        Self {
            config,
            phase,
            velocity: Vec2::ZERO,
            noise,
        }
    }

    /// The configuration this solver was built with.
    #[must_use]
    pub const fn config(&self) -> &FlockingConfig {
        &self.config
    }

    /// Smoothed velocity produced by the last [`advance`](Self::advance).
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Unsmoothed blend for `context` using the configured weights.
    #[must_use]
    pub fn solve(&self, context: &SteeringContext<'_>) -> Vec2 {
        self.solve_with(context, &self.config.weights)
    }

    /// Unsmoothed blend for `context` using explicit `weights`.
    #[must_use]
    pub fn solve_with(&self, context: &SteeringContext<'_>, weights: &FlockingWeights) -> Vec2 {
        let config = &self.config;
        combine(
            seek(context, config.follow_range),
            separation(context, config.separation_range),
            alignment(context, config.neighbor_radius),
            cohesion(context, config.neighbor_radius),
            noise_term(self.noise.as_ref(), context.time, self.phase),
            weights,
        )
    }

    /// Blends the terms for `context` and eases the velocity toward them.
    pub fn advance(&mut self, context: &SteeringContext<'_>, dt: f32) -> Vec2 {
        let desired = self.solve(context);
        self.velocity = exp_smooth(
            self.velocity,
            desired,
            self.config.movement_smoothing,
            dt,
        );
        debug!(
            "flocking desired {desired:?} smoothed {:?} ({} neighbours)",
            self.velocity,
            context.neighbors.len()
        );
        self.velocity
    }
}
