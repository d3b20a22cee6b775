//! Fire gating and projectile dispatch.
//!
//! An agent raises fire intents; its gate decides whether each intent becomes
//! a shot now, later, or never; the dispatcher turns permitted shots into
//! concrete fire requests across the agent's spawn points.

mod burst;
mod dispatch;
mod gate;
mod open_close;
mod weapon;

pub use burst::{BurstConfig, BurstGate, BurstPhase, BurstState};
pub use dispatch::{
    fan_angles, jitter, select_points, DispatchPolicy, FireRequest, FireSink,
    MultiPointDispatcher, RecoilConfig, SpawnPoint, Volley,
};
pub use gate::{AttackClock, AttackGate, GateConfig};
pub use open_close::{MovementEdge, OpenCloseConfig, OpenCloseGate, OpenCloseState};
pub use weapon::{AttackConfig, WeaponConfig};

/// Outcome of offering a fire intent to a gate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GateDecision {
    /// Fire this attack now.
    Fire(AttackConfig),
    /// Held until the weapon finishes opening.
    Deferred,
    /// Dropped.
    Rejected,
}

impl GateDecision {
    /// The attack to fire, if the decision permits one.
    #[must_use]
    pub const fn fired(self) -> Option<AttackConfig> {
        match self {
            Self::Fire(attack) => Some(attack),
            Self::Deferred | Self::Rejected => None,
        }
    }
}
