//! Gate for weapons that must unfold before firing.
//!
//! The carrier may only open while stationary, must wait for an external
//! "opening complete" signal, and snaps shut the instant it starts moving.
//! The signal normally comes from an animation; a configured opening time
//! lets a driver without animations raise it on a timer instead.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::weapon::AttackConfig;
use super::GateDecision;
use crate::error::{non_negative, ConfigError};

/// Settings of an open/close weapon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenCloseConfig {
    /// Length of the unfold animation in seconds. `None` waits for an
    /// explicit completion signal.
    pub opening_time: Option<f32>,
}

impl OpenCloseConfig {
    /// Checks the opening time.
    ///
    /// # Errors
    /// Returns [`ConfigError::NegativeRange`] or [`ConfigError::NonFinite`]
    /// for a bad opening time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(seconds) = self.opening_time {
            non_negative("opening_time", seconds)?;
        }
        Ok(())
    }
}

/// Physical state of a gated weapon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpenCloseState {
    /// Folded; a fire intent starts opening.
    #[default]
    Closed,
    /// Unfolding; fire intents are held until the opening completes.
    Opening,
    /// Deployed; fire intents execute immediately.
    Open,
}

/// Edge in the carrier's movement state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovementEdge {
    /// Stationary to moving.
    Started,
    /// Moving to stationary.
    Stopped,
}

/// Open/close state machine with a single pending-fire slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OpenCloseGate {
    state: OpenCloseState,
    pending: Option<AttackConfig>,
    moving: bool,
    config: OpenCloseConfig,
}

impl OpenCloseGate {
    /// Creates a closed, stationary gate that waits for an explicit signal.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_config(OpenCloseConfig { opening_time: None })
    }

    /// Creates a closed, stationary gate with the given settings.
    #[must_use]
    pub const fn with_config(config: OpenCloseConfig) -> Self {
        Self {
            state: OpenCloseState::Closed,
            pending: None,
            moving: false,
            config,
        }
    }

    /// Seconds the opening animation lasts, when timed.
    #[must_use]
    pub const fn opening_time(&self) -> Option<f32> {
        self.config.opening_time
    }

    /// Feeds the carrier's movement flag, returning the edge if it changed.
    ///
    /// Starting to move closes the weapon and discards any pending request,
    /// whatever phase the opening animation was in.
    pub fn update_movement(&mut self, is_moving: bool) -> Option<MovementEdge> {
        if is_moving == self.moving {
            return None;
        }
        self.moving = is_moving;
        if is_moving {
            if self.state != OpenCloseState::Closed || self.pending.is_some() {
                info!("carrier moving: closing weapon from {:?}", self.state);
            }
            self.close();
            Some(MovementEdge::Started)
        } else {
            Some(MovementEdge::Stopped)
        }
    }

    /// Handles a fire intent.
    ///
    /// Rejected while moving. Starts opening when closed, replaces the pending
    /// request while opening, and fires straight away when already open.
    pub fn request_fire(&mut self, attack: AttackConfig) -> GateDecision {
        if self.moving {
            debug!("fire intent rejected: carrier is moving");
            return GateDecision::Rejected;
        }
        match self.state {
            OpenCloseState::Closed => {
                self.state = OpenCloseState::Opening;
                self.pending = Some(attack);
                debug!("fire intent deferred: opening weapon");
                GateDecision::Deferred
            }
            OpenCloseState::Opening => {
                self.pending = Some(attack);
                GateDecision::Deferred
            }
            OpenCloseState::Open => GateDecision::Fire(attack),
        }
    }

    /// Handles the external "opening animation complete" signal.
    ///
    /// Returns the pending request, if any, to be fired this step. Signals
    /// arriving after the weapon was closed are ignored.
    pub fn opening_complete(&mut self) -> Option<AttackConfig> {
        if self.state != OpenCloseState::Opening {
            debug!("opening-complete ignored in state {:?}", self.state);
            return None;
        }
        self.state = OpenCloseState::Open;
        self.pending.take()
    }

    /// Closes the weapon and drops any pending request.
    pub fn force_close(&mut self) {
        self.close();
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> OpenCloseState {
        self.state
    }

    /// Whether the weapon has started or finished opening.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self.state, OpenCloseState::Closed)
    }

    /// Whether a fire intent would execute immediately.
    #[must_use]
    pub const fn can_fire(&self) -> bool {
        matches!(self.state, OpenCloseState::Open) && !self.moving
    }

    /// Last movement flag seen.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.moving
    }

    /// Request captured while opening, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&AttackConfig> {
        self.pending.as_ref()
    }

    fn close(&mut self) {
        self.state = OpenCloseState::Closed;
        self.pending = None;
    }
}
