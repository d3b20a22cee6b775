//! Weapon and attack parameters supplied by the stats collaborator.
use serde::{Deserialize, Serialize};

use crate::error::{non_negative, ConfigError};
use crate::sight::{Layer, LayerMask};

/// Shape of one shot's projectile fan.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Projectiles launched from each active spawn point. Zero is allowed and
    /// makes every shot an empty volley.
    pub projectiles_per_shot: u16,
    /// Angle between neighbouring projectiles of the fan, in degrees.
    pub angular_spacing: f32,
    /// Half-width of the random jitter added to each projectile, in degrees.
    pub spread: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            projectiles_per_shot: 1,
            angular_spacing: 10.0,
            spread: 0.0,
        }
    }
}

/// Full attack description: fan shape plus the payload the renderer needs.
///
/// The core reads `weapon`, `delay`, `size` and `target` and passes the rest
/// through untouched in every fire request.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackConfig {
    /// Fan shape.
    #[serde(flatten)]
    pub weapon: WeaponConfig,
    /// Minimum seconds between fire intents for agents that pace themselves.
    pub delay: f32,
    /// Damage dealt per projectile.
    pub power: f32,
    /// Projectile scale; optionally scales recoil.
    pub size: f32,
    /// Projectile travel speed.
    pub speed: f32,
    /// Layers the projectiles (and sight checks) are aimed at.
    pub target: LayerMask,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            weapon: WeaponConfig::default(),
            delay: 1.0,
            power: 1.0,
            size: 1.0,
            speed: 10.0,
            target: LayerMask::of(Layer::PLAYER),
        }
    }
}

impl AttackConfig {
    /// Checks fan angles and payload magnitudes.
    ///
    /// # Errors
    /// Returns the first offending value as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("angular_spacing", self.weapon.angular_spacing)?;
        non_negative("spread", self.weapon.spread)?;
        non_negative("attack_delay", self.delay)?;
        non_negative("projectile_size", self.size)?;
        non_negative("projectile_speed", self.speed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weapon_fields_flatten_into_attack_json() {
        let attack: AttackConfig = serde_json::from_str(
            r#"{ "projectiles_per_shot": 3, "angular_spacing": 15.0, "delay": 0.5 }"#,
        )
        .expect("attack config should parse");
        assert_eq!(attack.weapon.projectiles_per_shot, 3);
        assert!((attack.weapon.angular_spacing - 15.0).abs() < f32::EPSILON);
        assert!((attack.delay - 0.5).abs() < f32::EPSILON);
        assert_eq!(attack.target, LayerMask::of(Layer::PLAYER));
    }

    #[test]
    fn empty_fan_is_valid() {
        let mut attack = AttackConfig::default();
        attack.weapon.projectiles_per_shot = 0;
        assert_eq!(attack.validate(), Ok(()));
    }

    #[test]
    fn negative_spread_is_rejected() {
        let mut attack = AttackConfig::default();
        attack.weapon.spread = -1.0;
        assert!(attack.validate().is_err());
    }
}
