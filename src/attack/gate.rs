//! Gate strategy selection and the intent pacing clock.
use serde::{Deserialize, Serialize};

use super::burst::{elapsed_since, BurstConfig, BurstGate};
use super::open_close::{MovementEdge, OpenCloseConfig, OpenCloseGate};
use super::weapon::AttackConfig;
use super::GateDecision;
use crate::error::ConfigError;

/// Selects which gate an agent fires through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GateConfig {
    /// Bursts with line-of-sight checks.
    Burst(BurstConfig),
    /// Unfold while stationary, then fire.
    OpenClose(OpenCloseConfig),
    /// Every intent fires.
    #[default]
    Ungated,
}

impl GateConfig {
    /// Validates the variant's own settings.
    ///
    /// # Errors
    /// Propagates [`BurstConfig::validate`] and
    /// [`OpenCloseConfig::validate`] failures.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Burst(config) => config.validate(),
            Self::OpenClose(config) => config.validate(),
            Self::Ungated => Ok(()),
        }
    }

    /// Whether this gate paces itself and wants an intent every tick.
    #[must_use]
    pub const fn self_paced(&self) -> bool {
        matches!(self, Self::Burst(_))
    }
}

/// Per-agent gate deciding whether a fire intent becomes a shot.
#[derive(Clone, Debug, PartialEq)]
pub enum AttackGate {
    /// Burst-fire timing with sight checks.
    Burst(BurstGate),
    /// Open/close weapon.
    OpenClose(OpenCloseGate),
    /// Pass-through.
    Ungated,
}

impl AttackGate {
    /// Builds the gate selected by `config`.
    #[must_use]
    pub const fn from_config(config: &GateConfig) -> Self {
        match config {
            GateConfig::Burst(burst) => Self::Burst(BurstGate::new(*burst)),
            GateConfig::OpenClose(open_close) => {
                Self::OpenClose(OpenCloseGate::with_config(*open_close))
            }
            GateConfig::Ungated => Self::Ungated,
        }
    }

    /// Feeds the carrier's movement flag.
    ///
    /// Starting to move closes an open/close weapon and abandons a burst in
    /// progress. The ungated strategy ignores movement.
    pub fn update_movement(&mut self, is_moving: bool) -> Option<MovementEdge> {
        match self {
            Self::OpenClose(gate) => gate.update_movement(is_moving),
            Self::Burst(gate) => gate.update_movement(is_moving),
            Self::Ungated => None,
        }
    }

    /// Decides what happens to a fire intent at time `now`.
    ///
    /// `sight` is only evaluated by the burst gate, and only when its timers
    /// would otherwise allow a shot.
    pub fn request(
        &mut self,
        now: f32,
        attack: AttackConfig,
        sight: impl FnOnce() -> bool,
    ) -> GateDecision {
        match self {
            Self::Burst(gate) => {
                if gate.try_fire(now, sight) {
                    GateDecision::Fire(attack)
                } else {
                    GateDecision::Rejected
                }
            }
            Self::OpenClose(gate) => gate.request_fire(attack),
            Self::Ungated => GateDecision::Fire(attack),
        }
    }

    /// Forwards the "opening animation complete" signal.
    pub fn opening_complete(&mut self) -> Option<AttackConfig> {
        match self {
            Self::OpenClose(gate) => gate.opening_complete(),
            Self::Burst(_) | Self::Ungated => None,
        }
    }

    /// Clears any "attacking" status when no intent was raised this tick.
    pub fn stand_down(&mut self) {
        if let Self::Burst(gate) = self {
            gate.stand_down();
        }
    }
}

/// Paces fire intents to at most one per `delay` seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackClock {
    delay: f32,
    last: Option<f32>,
}

impl AttackClock {
    /// Creates a clock that is ready immediately.
    #[must_use]
    pub const fn new(delay: f32) -> Self {
        Self { delay, last: None }
    }

    /// Whether `delay` has elapsed since the last marked intent.
    #[must_use]
    pub fn ready(&self, now: f32) -> bool {
        elapsed_since(self.last, now, self.delay)
    }

    /// Records an intent at `now`.
    pub fn mark(&mut self, now: f32) {
        self.last = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ungated_always_fires() {
        let mut gate = AttackGate::from_config(&GateConfig::Ungated);
        let decision = gate.request(0.0, AttackConfig::default(), || false);
        assert!(matches!(decision, GateDecision::Fire(_)));
    }

    #[test]
    fn burst_rejection_maps_to_rejected() {
        let mut gate = AttackGate::from_config(&GateConfig::Burst(BurstConfig::default()));
        let decision = gate.request(0.0, AttackConfig::default(), || false);
        assert_eq!(decision, GateDecision::Rejected);
    }

    #[test]
    fn moving_abandons_a_burst() {
        let mut gate = AttackGate::from_config(&GateConfig::Burst(BurstConfig::default()));
        let attack = AttackConfig::default();
        assert_eq!(gate.request(0.0, attack, || true), GateDecision::Fire(attack));
        assert_eq!(gate.update_movement(true), Some(MovementEdge::Started));
        let AttackGate::Burst(burst) = &gate else {
            panic!("expected burst gate");
        };
        assert_eq!(burst.state().shots_fired, 0);
    }

    #[test]
    fn open_close_parses_with_and_without_opening_time() {
        let timed: GateConfig =
            serde_json::from_str(r#"{ "kind": "open_close", "opening_time": 0.5 }"#)
                .expect("timed gate should parse");
        assert_eq!(
            timed,
            GateConfig::OpenClose(OpenCloseConfig {
                opening_time: Some(0.5)
            })
        );
        let signalled: GateConfig = serde_json::from_str(r#"{ "kind": "open_close" }"#)
            .expect("signalled gate should parse");
        assert_eq!(signalled, GateConfig::OpenClose(OpenCloseConfig::default()));
    }

    #[test]
    fn clock_paces_intents() {
        let mut clock = AttackClock::new(0.5);
        assert!(clock.ready(0.0));
        clock.mark(0.0);
        assert!(!clock.ready(0.25));
        assert!(clock.ready(0.5));
    }

    #[test]
    fn burst_gate_parses_with_default_cooldown() {
        let parsed: GateConfig =
            serde_json::from_str(r#"{ "kind": "burst", "burst_size": 3, "fire_rate": 0.1 }"#)
                .expect("gate config should parse");
        let GateConfig::Burst(burst) = parsed else {
            panic!("expected burst gate, got {parsed:?}");
        };
        assert_eq!(burst.burst_size, 3);
        assert!((burst.cooldown - 2.0).abs() < f32::EPSILON);
    }
}
