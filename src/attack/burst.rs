//! Burst-fire gate: fixed-size volleys at a fixed rate, then a cooldown.
//!
//! The cooldown is measured from the start of the previous burst. A shot
//! suppressed by a failed sight check changes nothing: it neither spends the
//! burst budget nor advances any timer. A carrier that starts moving
//! abandons its current burst; the cooldown still runs from that burst's
//! start.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::open_close::MovementEdge;
use crate::constants::TIMER_EPSILON;
use crate::error::{non_negative, positive, ConfigError};

/// Burst sizing and timing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Shots per burst.
    pub burst_size: u32,
    /// Seconds between shots inside a burst.
    pub fire_rate: f32,
    /// Seconds from the start of one burst until the next may begin.
    pub cooldown: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            burst_size: 5,
            fire_rate: 0.2,
            cooldown: 2.0,
        }
    }
}

impl BurstConfig {
    /// Checks burst size and intervals.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBurstSize`] for an empty burst, or the
    /// offending interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.burst_size == 0 {
            return Err(ConfigError::InvalidBurstSize);
        }
        positive("burst_fire_rate", self.fire_rate)?;
        non_negative("burst_cooldown", self.cooldown)?;
        Ok(())
    }
}

/// Observable phase of a [`BurstGate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstPhase {
    /// Ready to open a new burst on the next intent.
    Idle,
    /// Mid-burst; shots are paced by the fire rate.
    Bursting,
    /// Burst finished; waiting for the cooldown to elapse.
    Cooldown,
}

/// Counters mutated only by the gate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BurstState {
    /// Shots fired in the current burst; zero between bursts.
    pub shots_fired: u32,
    /// Time of the most recent permitted shot.
    pub last_shot_time: Option<f32>,
    /// Time the current or most recent burst started.
    pub last_burst_start_time: Option<f32>,
}

/// Per-agent burst state machine.
#[derive(Clone, Debug, PartialEq)]
pub struct BurstGate {
    config: BurstConfig,
    state: BurstState,
    bursting: bool,
    attacking: bool,
    moving: bool,
}

impl BurstGate {
    /// Creates an idle gate.
    #[must_use]
    pub const fn new(config: BurstConfig) -> Self {
        Self {
            config,
            state: BurstState {
                shots_fired: 0,
                last_shot_time: None,
                last_burst_start_time: None,
            },
            bursting: false,
            attacking: false,
            moving: false,
        }
    }

    /// Handles a fire intent at time `now`.
    ///
    /// `sight` is consulted only once timing would allow a shot, so blocked
    /// agents waiting on a cooldown never pay for a ray cast. Returns `true`
    /// when a shot is permitted this tick.
    pub fn try_fire(&mut self, now: f32, sight: impl FnOnce() -> bool) -> bool {
        self.attacking = false;

        if !self.bursting && !self.cooldown_elapsed(now) {
            return false;
        }
        if !elapsed_since(self.state.last_shot_time, now, self.config.fire_rate) {
            return false;
        }
        if !sight() {
            debug!("burst shot suppressed: no line of sight");
            return false;
        }

        if !self.bursting {
            self.bursting = true;
            self.state.shots_fired = 0;
            self.state.last_burst_start_time = Some(now);
            info!("burst started at {now:.2}s");
        }

        self.state.shots_fired += 1;
        self.state.last_shot_time = Some(now);
        self.attacking = true;
        debug!(
            "burst shot {}/{} at {now:.2}s",
            self.state.shots_fired, self.config.burst_size
        );

        if self.state.shots_fired >= self.config.burst_size {
            self.bursting = false;
            self.state.shots_fired = 0;
        }
        true
    }

    /// Feeds the carrier's movement flag, returning the edge if it changed.
    ///
    /// Starting to move interrupts the burst in progress.
    pub fn update_movement(&mut self, is_moving: bool) -> Option<MovementEdge> {
        if is_moving == self.moving {
            return None;
        }
        self.moving = is_moving;
        if is_moving {
            self.interrupt();
            Some(MovementEdge::Started)
        } else {
            Some(MovementEdge::Stopped)
        }
    }

    /// Abandons the current burst, e.g. because the carrier started moving.
    ///
    /// The shot count returns to zero. Timers are kept, so the next burst
    /// still waits for the cooldown measured from the abandoned burst's start.
    pub fn interrupt(&mut self) {
        if self.bursting {
            info!(
                "burst interrupted after {}/{} shots",
                self.state.shots_fired, self.config.burst_size
            );
        }
        self.bursting = false;
        self.state.shots_fired = 0;
        self.attacking = false;
    }

    /// Marks the agent as not attacking, e.g. when the target left range.
    pub fn stand_down(&mut self) {
        self.attacking = false;
    }

    /// Whether the last intent produced a shot.
    #[must_use]
    pub const fn is_attacking(&self) -> bool {
        self.attacking
    }

    /// Current counters.
    #[must_use]
    pub const fn state(&self) -> &BurstState {
        &self.state
    }

    /// The configuration this gate was built with.
    #[must_use]
    pub const fn config(&self) -> &BurstConfig {
        &self.config
    }

    /// Phase of the gate as seen at time `now`.
    #[must_use]
    pub fn phase(&self, now: f32) -> BurstPhase {
        if self.bursting {
            BurstPhase::Bursting
        } else if self.cooldown_elapsed(now) {
            BurstPhase::Idle
        } else {
            BurstPhase::Cooldown
        }
    }

    fn cooldown_elapsed(&self, now: f32) -> bool {
        elapsed_since(self.state.last_burst_start_time, now, self.config.cooldown)
    }
}

/// Whether `interval` has passed since `since`, within [`TIMER_EPSILON`].
pub(crate) fn elapsed_since(since: Option<f32>, now: f32, interval: f32) -> bool {
    since.map_or(true, |t| now - t + TIMER_EPSILON >= interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_intent_opens_burst_immediately() {
        let mut gate = BurstGate::new(BurstConfig::default());
        assert_eq!(gate.phase(0.0), BurstPhase::Idle);
        assert!(gate.try_fire(0.0, || true));
        assert_eq!(gate.phase(0.0), BurstPhase::Bursting);
        assert_eq!(gate.state().shots_fired, 1);
    }

    #[test]
    fn shots_are_paced_by_fire_rate() {
        let mut gate = BurstGate::new(BurstConfig::default());
        assert!(gate.try_fire(0.0, || true));
        assert!(!gate.try_fire(0.125, || true));
        assert!(!gate.is_attacking());
        assert!(gate.try_fire(0.25, || true));
    }

    #[test]
    fn blocked_sight_changes_nothing() {
        let mut gate = BurstGate::new(BurstConfig::default());
        assert!(!gate.try_fire(0.0, || false));
        assert_eq!(gate.state(), &BurstState::default());
        assert_eq!(gate.phase(0.0), BurstPhase::Idle);
    }

    #[test]
    fn sight_not_consulted_during_cooldown() {
        let config = BurstConfig {
            burst_size: 1,
            ..BurstConfig::default()
        };
        let mut gate = BurstGate::new(config);
        assert!(gate.try_fire(0.0, || true));
        assert!(!gate.try_fire(0.5, || panic!("sight queried during cooldown")));
        assert_eq!(gate.phase(0.5), BurstPhase::Cooldown);
    }

    #[test]
    fn interval_tolerates_float_rounding() {
        assert!(elapsed_since(Some(0.6), 0.8, 0.2));
        assert!(!elapsed_since(Some(0.6), 0.79, 0.2));
    }

    #[test]
    fn interrupt_resets_count_but_not_timers() {
        let mut gate = BurstGate::new(BurstConfig::default());
        assert!(gate.try_fire(0.0, || true));
        assert!(gate.try_fire(0.2, || true));
        gate.interrupt();
        assert_eq!(gate.state().shots_fired, 0);
        assert_eq!(gate.state().last_burst_start_time, Some(0.0));
        assert_eq!(gate.phase(0.4), BurstPhase::Cooldown);
    }

    #[test]
    fn only_the_start_of_movement_interrupts() {
        let mut gate = BurstGate::new(BurstConfig::default());
        assert_eq!(gate.update_movement(true), Some(MovementEdge::Started));
        assert!(gate.try_fire(0.0, || true));
        assert_eq!(gate.update_movement(true), None);
        assert!(gate.try_fire(0.2, || true));
        assert_eq!(gate.state().shots_fired, 2);
    }

    #[test]
    fn zero_burst_size_is_rejected() {
        let config = BurstConfig {
            burst_size: 0,
            ..BurstConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidBurstSize));
    }
}
