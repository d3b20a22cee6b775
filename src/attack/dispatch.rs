//! Spawn-point selection and projectile fan layout.
//!
//! A dispatcher turns one permitted shot into concrete fire requests: it
//! picks the active spawn points according to its policy, then lays out a
//! symmetric fan of projectiles around the aim direction at each point.

use glam::Vec2;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::weapon::{AttackConfig, WeaponConfig};
use crate::constants::SINGLE_POINT_RECOIL_SCALE;
use crate::error::{non_negative, ConfigError};
use crate::numeric::count_to_f32;
use crate::vector_math::{heading_degrees, normalize_or_zero, rotate_degrees};

/// Rule selecting which spawn points fire on a given shot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// Every spawn point fires.
    #[default]
    AllSimultaneous,
    /// One point fires, cycling round-robin.
    Sequential,
    /// `min(max_points, N)` distinct points chosen at random; zero means all.
    RandomSubset {
        /// Upper bound on points per shot.
        max_points: usize,
    },
}

/// A projectile origin fixed relative to the agent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnPoint {
    /// Offset from the agent's position.
    pub offset: Vec2,
    /// Rotate `offset` to follow the aim heading (a muzzle on a turning arm).
    pub track_aim: bool,
}

impl SpawnPoint {
    /// A spawn point at the agent's centre.
    pub const CENTER: Self = Self {
        offset: Vec2::ZERO,
        track_aim: false,
    };

    /// World position of this point for an agent at `origin` aiming along `aim`.
    #[must_use]
    pub fn world_position(&self, origin: Vec2, aim: Vec2) -> Vec2 {
        if self.track_aim {
            origin + rotate_degrees(self.offset, heading_degrees(aim))
        } else {
            origin + self.offset
        }
    }
}

/// One projectile to be spawned by the rendering/physics collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FireRequest {
    /// World spawn position.
    pub position: Vec2,
    /// Unit travel direction.
    pub direction: Vec2,
    /// Attack payload passed through unchanged.
    pub attack: AttackConfig,
}

/// Receives fire requests as they are produced.
pub trait FireSink {
    /// Called once per projectile.
    fn fire(&mut self, request: &FireRequest);
}

impl FireSink for Vec<FireRequest> {
    fn fire(&mut self, request: &FireRequest) {
        self.push(*request);
    }
}

/// Recoil applied to the shooter after each volley.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoilConfig {
    /// Base kick; zero disables recoil.
    pub strength: f32,
    /// Multiplier converting strength into an impulse.
    pub scale: f32,
    /// Multiply the kick by the projectile size.
    pub size_scaled: bool,
}

impl Default for RecoilConfig {
    fn default() -> Self {
        Self {
            strength: 0.5,
            scale: SINGLE_POINT_RECOIL_SCALE,
            size_scaled: false,
        }
    }
}

impl RecoilConfig {
    /// No recoil at all.
    pub const NONE: Self = Self {
        strength: 0.0,
        scale: SINGLE_POINT_RECOIL_SCALE,
        size_scaled: false,
    };

    /// Checks that strength and scale are non-negative.
    ///
    /// # Errors
    /// Returns the first offending value as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("recoil_strength", self.strength)?;
        non_negative("recoil_scale", self.scale)?;
        Ok(())
    }

    /// Impulse pushing the shooter away from `aim` after a volley from
    /// `active_points` spawn points.
    ///
    /// Spreading the volley over more points reduces the kick per point.
    #[must_use]
    pub fn impulse(&self, aim: Vec2, attack: &AttackConfig, active_points: usize) -> Option<Vec2> {
        if self.strength <= 0.0 || active_points == 0 {
            return None;
        }
        let size = if self.size_scaled { attack.size } else { 1.0 };
        let force = self.strength * self.scale * size / count_to_f32(active_points);
        Some(-normalize_or_zero(aim) * force)
    }
}

/// Offsets, in degrees, of each projectile of the fan before jitter.
///
/// The fan is centred on the aim direction:
/// `min = -(n/2)·spacing + spacing/2`, then `min + i·spacing`.
///
/// # Examples
/// ```
/// use hostile::attack::{fan_angles, WeaponConfig};
/// let weapon = WeaponConfig { projectiles_per_shot: 3, angular_spacing: 10.0, spread: 0.0 };
/// let angles: Vec<f32> = fan_angles(&weapon).collect();
/// assert_eq!(angles, vec![-10.0, 0.0, 10.0]);
/// ```
pub fn fan_angles(weapon: &WeaponConfig) -> impl Iterator<Item = f32> {
    let spacing = weapon.angular_spacing;
    let count = weapon.projectiles_per_shot;
    let min_angle = -(f32::from(count) / 2.0) * spacing + 0.5 * spacing;
    (0..count).map(move |i| f32::from(i).mul_add(spacing, min_angle))
}

/// Uniform jitter in `[-spread, spread]`; zero when `spread` is not positive.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, spread: f32) -> f32 {
    if spread > 0.0 {
        rng.gen_range(-spread..=spread)
    } else {
        0.0
    }
}

/// Indices of the points that fire for one shot.
///
/// `cursor` is the round-robin position used by [`DispatchPolicy::Sequential`]
/// and is advanced in place. `count` must be non-zero.
pub fn select_points<R: Rng + ?Sized>(
    policy: DispatchPolicy,
    count: usize,
    cursor: &mut usize,
    rng: &mut R,
) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }
    match policy {
        DispatchPolicy::AllSimultaneous => (0..count).collect(),
        DispatchPolicy::Sequential => {
            let current = *cursor % count;
            *cursor = (current + 1) % count;
            vec![current]
        }
        DispatchPolicy::RandomSubset { max_points } => {
            let picks = if max_points == 0 {
                count
            } else {
                max_points.min(count)
            };
            let mut pool: Vec<usize> = (0..count).collect();
            (0..picks)
                .map(|_| pool.remove(rng.gen_range(0..pool.len())))
                .collect()
        }
    }
}

/// Fire requests of one volley plus how many points took part.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Volley {
    /// One request per projectile.
    pub requests: Vec<FireRequest>,
    /// Number of spawn points that fired.
    pub active_points: usize,
}

/// Expands permitted shots into fire requests across several spawn points.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiPointDispatcher {
    policy: DispatchPolicy,
    points: Vec<SpawnPoint>,
    cursor: usize,
}

impl MultiPointDispatcher {
    /// Creates a dispatcher over `points`.
    ///
    /// # Errors
    /// Returns [`ConfigError::EmptySpawnPoints`] when `points` is empty.
    pub fn new(policy: DispatchPolicy, points: Vec<SpawnPoint>) -> Result<Self, ConfigError> {
        if points.is_empty() {
            return Err(ConfigError::EmptySpawnPoints);
        }
        Ok(Self {
            policy,
            points,
            cursor: 0,
        })
    }

    /// Starts the round-robin cursor at `cursor` (wrapped to the point count).
    #[must_use]
    pub fn with_cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor % self.points.len();
        self
    }

    /// Selection policy.
    #[must_use]
    pub const fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Configured spawn points.
    #[must_use]
    pub fn points(&self) -> &[SpawnPoint] {
        &self.points
    }

    /// Selects the spawn points that fire next, advancing the cursor.
    pub fn select<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<usize> {
        select_points(self.policy, self.points.len(), &mut self.cursor, rng)
    }

    /// Produces the fire requests for one shot from an agent at `origin`.
    pub fn dispatch<R: Rng + ?Sized>(
        &mut self,
        origin: Vec2,
        aim: Vec2,
        attack: &AttackConfig,
        rng: &mut R,
    ) -> Volley {
        let aim_unit = normalize_or_zero(aim);
        let selected = self.select(rng);
        let mut requests =
            Vec::with_capacity(selected.len() * usize::from(attack.weapon.projectiles_per_shot));
        for point in selected.iter().filter_map(|&index| self.points.get(index)) {
            let position = point.world_position(origin, aim_unit);
            for angle in fan_angles(&attack.weapon) {
                let offset = angle + jitter(rng, attack.weapon.spread);
                requests.push(FireRequest {
                    position,
                    direction: rotate_degrees(aim_unit, offset),
                    attack: *attack,
                });
            }
        }
        debug!(
            "dispatched {} projectiles from {} points ({:?})",
            requests.len(),
            selected.len(),
            self.policy
        );
        Volley {
            requests,
            active_points: selected.len(),
        }
    }
}
