//! Tuning constants shared across solvers, gates and the world driver.
//!
//! Per-archetype values live in the configuration structs; the numbers here
//! are thresholds that every agent agrees on.

/// Speed below which a body counts as stationary, in units per second.
pub const MOVING_THRESHOLD: f32 = 0.1;
/// Targets closer than this are treated as reached and produce no seek force.
pub const SEEK_MIN_DISTANCE: f32 = 0.1;
/// Neighbours closer than this are ignored by separation to avoid dividing by
/// a vanishing distance.
pub const SEPARATION_MIN_DISTANCE: f32 = 0.01;
/// Scale applied to simulation time before sampling steering noise.
pub const NOISE_TIME_SCALE: f32 = 0.5;
/// Upper bound (exclusive) of the per-agent noise phase.
pub const NOISE_PHASE_RANGE: f32 = 100.0;
/// Maximum number of neighbours handed to a flocking agent each tick.
pub const NEIGHBOR_CAPACITY: usize = 20;
/// Recoil multiplier for single-origin shooters.
pub const SINGLE_POINT_RECOIL_SCALE: f32 = 100.0;
/// Recoil multiplier for heavy multi-origin shooters.
pub const MULTI_POINT_RECOIL_SCALE: f32 = 50.0;
/// Default fixed simulation step in seconds.
pub const DEFAULT_FIXED_STEP: f32 = 0.02;
/// Minimum change in aim direction, as `1 - cos(angle)`, reported as a new aim.
pub const AIM_CHANGE_EPSILON: f32 = 1e-6;
/// Mass dividing recoil impulses into a velocity kick.
pub const RECOIL_MASS: f32 = 10.0;
/// Exponential decay rate of recoil velocity, per second.
pub const RECOIL_DAMPING: f32 = 4.0;
/// Slack allowed when comparing elapsed time against an interval, so that
/// intervals built from summed `f32` steps are not missed by a rounding error.
pub const TIMER_EPSILON: f32 = 1e-4;
