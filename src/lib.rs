#![cfg_attr(docsrs, feature(doc_cfg))]
//! Enemy steering and coordinated-attack decisions for a 2D action game.
//!
//! Each [`EnemyAgent`] combines one motion solver (flocking, approach/retreat
//! or a fixed pattern), one fire gate (burst, open/close or ungated) and an
//! optional multi-point weapon. The [`World`] drives agents at a fixed step
//! and applies their outputs to simple bodies.
pub mod agent;
pub mod aim;
pub mod arena;
pub mod attack;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod logging;
pub mod numeric;
pub mod sight;
pub mod steering;
pub mod vector_math;
pub mod world;
pub use constants::*;

// Re-export commonly used items
pub use agent::{AgentConfig, AgentOutput, Diagnostics, EnemyAgent, LogDiagnostics, TickSignals};
pub use aim::{AimConfig, AimTracker, Facing, FacingMode};
pub use arena::{Arena, Wall};
pub use attack::{
    AttackConfig, AttackGate, BurstConfig, BurstGate, DispatchPolicy, FireRequest, FireSink,
    GateConfig, GateDecision, MultiPointDispatcher, OpenCloseConfig, OpenCloseGate, OpenCloseState,
    RecoilConfig, SpawnPoint, WeaponConfig,
};
pub use config::Scenario;
pub use entity::{AgentId, Body};
pub use error::ConfigError;
pub use logging::init as init_logging;
pub use sight::{has_line_of_sight, Layer, LayerMask, LineOfSight, RayHit};
pub use steering::{
    FlockingConfig, FlockingSolver, MotionConfig, Neighbor, NoiseSource, PerlinNoise,
    SteeringContext,
};
pub use world::{TickReport, World};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use hostile::prelude::*;
    //! ```

    pub use crate::AgentConfig;
    pub use crate::AgentId;
    pub use crate::Arena;
    pub use crate::EnemyAgent;
    pub use crate::LineOfSight;
    pub use crate::SteeringContext;
    pub use crate::TickSignals;
    pub use crate::World;
    pub use glam::Vec2;
}
