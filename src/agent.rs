//! A single enemy: one motion solver, one gate and an optional armament.
//!
//! The world calls [`EnemyAgent::step`] once per fixed tick and applies the
//! returned [`AgentOutput`]. Within a step the order is fixed: motion, then
//! movement edges into the gate, then aim, then gating, then dispatch.

use std::mem;

use glam::Vec2;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::aim::{AimConfig, AimTracker, Facing, FacingMode};
use crate::attack::{
    AttackClock, AttackConfig, AttackGate, BurstConfig, DispatchPolicy, FireRequest, FireSink,
    GateConfig, MultiPointDispatcher, OpenCloseConfig, OpenCloseState, RecoilConfig, SpawnPoint,
    WeaponConfig,
};
use crate::constants::{MULTI_POINT_RECOIL_SCALE, NOISE_PHASE_RANGE, SINGLE_POINT_RECOIL_SCALE};
use crate::entity::AgentId;
use crate::error::{non_negative, ConfigError};
use crate::sight::{has_line_of_sight, Layer, LayerMask, LineOfSight};
use crate::steering::{
    ApproachRetreatConfig, BobConfig, FloatBob, FlockingSolver, MotionConfig, NoiseSource,
    PatternConfig, PatternMotion, PerlinNoise, SteeringContext,
};

/// Receives construction-time misconfiguration reports.
#[cfg_attr(test, mockall::automock)]
pub trait Diagnostics {
    /// Called once for an agent that was disabled by `error`.
    fn report(&self, agent: AgentId, error: &ConfigError);
}

/// Reports misconfiguration through the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&self, agent: AgentId, error: &ConfigError) {
        warn!("{agent} disabled: {error}");
    }
}

/// Everything needed to build one agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Archetype name used in logs.
    pub name: String,
    /// Speed applied to a unit move direction, in units per second.
    pub move_speed: f32,
    /// Motion solver.
    pub motion: MotionConfig,
    /// Fire gate.
    pub gate: GateConfig,
    /// Weapon; `None` for unarmed agents.
    pub attack: Option<AttackConfig>,
    /// Fire intents are only raised while the target is within this distance.
    pub engage_range: f32,
    /// Layers that block line of sight.
    pub obstruction_mask: LayerMask,
    /// Spawn-point selection.
    pub dispatch: DispatchPolicy,
    /// Projectile origins relative to the agent.
    pub spawn_points: Vec<SpawnPoint>,
    /// Kick applied after each volley.
    pub recoil: RecoilConfig,
    /// Aim and facing.
    pub aim: AimConfig,
    /// Optional cosmetic bob.
    pub bob: Option<BobConfig>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: "enemy".to_owned(),
            move_speed: 3.0,
            motion: MotionConfig::default(),
            gate: GateConfig::default(),
            attack: None,
            engage_range: 20.0,
            obstruction_mask: LayerMask::of(Layer::LEVEL),
            dispatch: DispatchPolicy::default(),
            spawn_points: vec![SpawnPoint::CENTER],
            recoil: RecoilConfig::NONE,
            aim: AimConfig::default(),
            bob: None,
        }
    }
}

impl AgentConfig {
    /// Unarmed flocking swarmer that bobs while it drifts.
    #[must_use]
    pub fn floater() -> Self {
        Self {
            name: "floater".to_owned(),
            move_speed: 4.0,
            bob: Some(BobConfig::default()),
            ..Self::default()
        }
    }

    /// Heavy ranged unit: holds distance and fires bursts from four turrets,
    /// one turret per shot.
    #[must_use]
    pub fn airship() -> Self {
        let band = ApproachRetreatConfig::default();
        Self {
            name: "airship".to_owned(),
            move_speed: 2.0,
            motion: MotionConfig::ApproachRetreat(band),
            gate: GateConfig::Burst(BurstConfig::default()),
            attack: Some(AttackConfig {
                weapon: WeaponConfig {
                    projectiles_per_shot: 1,
                    angular_spacing: 10.0,
                    spread: 2.0,
                },
                ..AttackConfig::default()
            }),
            engage_range: band.follow_range,
            dispatch: DispatchPolicy::Sequential,
            spawn_points: [(-1.5, 0.5), (1.5, 0.5), (-1.5, -0.5), (1.5, -0.5)]
                .into_iter()
                .map(|(x, y)| SpawnPoint {
                    offset: Vec2::new(x, y),
                    track_aim: false,
                })
                .collect(),
            recoil: RecoilConfig {
                strength: 0.1,
                scale: MULTI_POINT_RECOIL_SCALE,
                size_scaled: true,
            },
            ..Self::default()
        }
    }

    /// Close-range turret that must stop and unfold before firing a spread.
    #[must_use]
    pub fn sphere() -> Self {
        let band = ApproachRetreatConfig {
            follow_range: 20.0,
            optimal_distance: 6.0,
            tolerance: 1.0,
        };
        Self {
            name: "sphere".to_owned(),
            move_speed: 2.5,
            motion: MotionConfig::ApproachRetreat(band),
            gate: GateConfig::OpenClose(OpenCloseConfig {
                opening_time: Some(0.5),
            }),
            attack: Some(AttackConfig {
                weapon: WeaponConfig {
                    projectiles_per_shot: 3,
                    angular_spacing: 15.0,
                    spread: 0.0,
                },
                delay: 1.5,
                ..AttackConfig::default()
            }),
            engage_range: band.follow_range,
            spawn_points: vec![SpawnPoint {
                offset: Vec2::new(0.6, 0.0),
                track_aim: true,
            }],
            recoil: RecoilConfig {
                strength: 0.0,
                scale: SINGLE_POINT_RECOIL_SCALE,
                size_scaled: false,
            },
            aim: AimConfig {
                facing: FacingMode::Rotate { speed: 6.0 },
            },
            ..Self::default()
        }
    }

    /// Unarmed drifter crossing the arena on a sine path.
    #[must_use]
    pub fn drifter() -> Self {
        Self {
            name: "drifter".to_owned(),
            motion: MotionConfig::Pattern(PatternConfig::default()),
            ..Self::default()
        }
    }

    /// Looks up a built-in archetype by name.
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "floater" => Some(Self::floater()),
            "airship" => Some(Self::airship()),
            "sphere" => Some(Self::sphere()),
            "drifter" => Some(Self::drifter()),
            _ => None,
        }
    }

    /// Checks every component's settings.
    ///
    /// # Errors
    /// Returns the first problem found; an armed agent without spawn points
    /// yields [`ConfigError::EmptySpawnPoints`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("move_speed", self.move_speed)?;
        non_negative("engage_range", self.engage_range)?;
        self.motion.validate()?;
        self.gate.validate()?;
        self.aim.validate()?;
        if let Some(attack) = &self.attack {
            attack.validate()?;
            self.recoil.validate()?;
            if self.spawn_points.is_empty() {
                return Err(ConfigError::EmptySpawnPoints);
            }
        }
        if let Some(bob) = &self.bob {
            bob.validate()?;
        }
        Ok(())
    }
}

/// Per-tick inputs an agent receives alongside its steering context.
#[derive(Clone, Copy)]
pub struct TickSignals<'a> {
    /// Whether the body moved faster than the moving threshold last tick.
    pub is_moving: bool,
    /// Ray-test collaborator.
    pub sight: &'a dyn LineOfSight,
}

/// Decisions produced by one agent in one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AgentOutput {
    /// Movement direction with magnitude at most one.
    pub move_direction: Vec2,
    /// Speed the direction is scaled by.
    pub move_speed: f32,
    /// New unit aim direction, only when it changed.
    pub aim: Option<Vec2>,
    /// Cosmetic facing.
    pub facing: Option<Facing>,
    /// Projectiles to spawn.
    pub fire_requests: Vec<FireRequest>,
    /// Recoil impulse from this tick's volley.
    pub recoil: Option<Vec2>,
    /// Whether a shot was permitted this tick.
    pub attacking: bool,
    /// Cosmetic vertical sprite offset.
    pub visual_offset: Option<f32>,
}

impl AgentOutput {
    /// Requested velocity: direction times speed.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.move_direction * self.move_speed
    }

    /// Forwards every fire request to `sink`.
    pub fn emit(&self, sink: &mut dyn FireSink) {
        for request in &self.fire_requests {
            sink.fire(request);
        }
    }
}

enum MotionSolver {
    Flocking(FlockingSolver),
    ApproachRetreat(ApproachRetreatConfig),
    Pattern(PatternMotion),
}

impl MotionSolver {
    fn build(config: &MotionConfig, phase: f32, noise: Box<dyn NoiseSource>) -> Self {
        match *config {
            MotionConfig::Flocking(flocking) => {
                Self::Flocking(FlockingSolver::new(flocking, phase, noise))
            }
            MotionConfig::ApproachRetreat(band) => Self::ApproachRetreat(band),
            MotionConfig::Pattern(pattern) => Self::Pattern(PatternMotion::new(pattern)),
        }
    }

    /// Unit-capped direction and the speed to scale it by.
    fn advance(&mut self, context: &SteeringContext<'_>, dt: f32, move_speed: f32) -> (Vec2, f32) {
        match self {
            Self::Flocking(solver) => (solver.advance(context, dt), move_speed),
            Self::ApproachRetreat(band) => (
                band.solve(context.target_distance, context.target_direction),
                move_speed,
            ),
            Self::Pattern(motion) => {
                let velocity = motion.advance(dt);
                let peak = motion.peak_speed();
                if peak > 0.0 {
                    (velocity / peak, peak)
                } else {
                    (Vec2::ZERO, 0.0)
                }
            }
        }
    }

    const fn aims_on_fire(&self) -> bool {
        matches!(self, Self::ApproachRetreat(_))
    }
}

struct Armament {
    attack: AttackConfig,
    dispatcher: MultiPointDispatcher,
    recoil: RecoilConfig,
}

struct AgentCore {
    move_speed: f32,
    engage_range: f32,
    obstruction_mask: LayerMask,
    motion: MotionSolver,
    gate: AttackGate,
    self_paced: bool,
    clock: AttackClock,
    armament: Option<Armament>,
    aim: AimTracker,
    bob: Option<FloatBob>,
    rng: StdRng,
}

impl AgentCore {
    fn build(
        config: &AgentConfig,
        mut rng: StdRng,
        noise: Box<dyn NoiseSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let phase = rng.gen_range(0.0..NOISE_PHASE_RANGE);
        let armament = config
            .attack
            .map(|attack| {
                Ok::<_, ConfigError>(Armament {
                    attack,
                    dispatcher: MultiPointDispatcher::new(
                        config.dispatch,
                        config.spawn_points.clone(),
                    )?,
                    recoil: config.recoil,
                })
            })
            .transpose()?;
        let bob = config
            .bob
            .as_ref()
            .map(|shape| FloatBob::new(shape, phase, &mut rng));
        Ok(Self {
            move_speed: config.move_speed,
            engage_range: config.engage_range,
            obstruction_mask: config.obstruction_mask,
            motion: MotionSolver::build(&config.motion, phase, noise),
            gate: AttackGate::from_config(&config.gate),
            self_paced: config.gate.self_paced(),
            clock: AttackClock::new(config.attack.map_or(0.0, |attack| attack.delay)),
            armament,
            aim: AimTracker::new(&config.aim),
            bob,
            rng,
        })
    }

    fn aims_on_fire(&self) -> bool {
        self.self_paced || self.motion.aims_on_fire()
    }

    fn step(
        &mut self,
        context: &SteeringContext<'_>,
        signals: &TickSignals<'_>,
        opening_complete: bool,
        dt: f32,
    ) -> AgentOutput {
        let now = context.time;
        let (move_direction, move_speed) = self.motion.advance(context, dt, self.move_speed);
        if let Some(edge) = self.gate.update_movement(signals.is_moving) {
            debug!("movement edge {edge:?} at {now:.2}s");
        }

        let mut output = AgentOutput {
            move_direction,
            move_speed,
            ..AgentOutput::default()
        };
        if !self.aims_on_fire() {
            output.aim = self.aim.update(context.target_direction);
        }

        let released = if opening_complete {
            self.gate.opening_complete()
        } else {
            None
        };
        let permitted = released.or_else(|| self.raise_intent(context, signals));
        if let Some(attack) = permitted {
            if self.aims_on_fire() {
                output.aim = self.aim.update(context.target_direction).or(output.aim);
            }
            self.fire(context.position, &attack, &mut output);
        }

        output.facing = Some(match &self.motion {
            MotionSolver::Pattern(motion) => Facing::Flip {
                flip_x: motion.facing_left(),
            },
            MotionSolver::Flocking(_) | MotionSolver::ApproachRetreat(_) => self.aim.facing(dt),
        });
        output.visual_offset = self.bob.as_mut().map(|bob| bob.advance(dt));
        output
    }

    /// Offers a fire intent to the gate when one is due.
    fn raise_intent(
        &mut self,
        context: &SteeringContext<'_>,
        signals: &TickSignals<'_>,
    ) -> Option<AttackConfig> {
        let attack = self.armament.as_ref()?.attack;
        let now = context.time;
        if context.target_distance > self.engage_range {
            self.gate.stand_down();
            return None;
        }
        if !self.self_paced {
            if !self.clock.ready(now) {
                return None;
            }
            self.clock.mark(now);
        }
        let origin = context.position;
        let direction = context.target_direction;
        let range = self.engage_range;
        let obstruction = self.obstruction_mask;
        self.gate
            .request(now, attack, || {
                has_line_of_sight(
                    signals.sight,
                    origin,
                    direction,
                    range,
                    attack.target,
                    obstruction,
                )
            })
            .fired()
    }

    fn fire(&mut self, origin: Vec2, attack: &AttackConfig, output: &mut AgentOutput) {
        let Some(armament) = self.armament.as_mut() else {
            return;
        };
        let aim = self.aim.direction();
        let volley = armament
            .dispatcher
            .dispatch(origin, aim, attack, &mut self.rng);
        if !volley.requests.is_empty() {
            output.recoil = armament.recoil.impulse(aim, attack, volley.active_points);
        }
        output.fire_requests = volley.requests;
        output.attacking = true;
    }
}

/// One enemy instance.
///
/// An agent whose configuration fails validation is built *inert*: the
/// problem is reported once to the diagnostics collaborator and every step
/// returns a default output.
pub struct EnemyAgent {
    id: AgentId,
    name: String,
    core: Option<AgentCore>,
    fault: Option<ConfigError>,
    opening_complete: bool,
}

impl std::fmt::Debug for EnemyAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnemyAgent")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("fault", &self.fault)
            .finish_non_exhaustive()
    }
}

impl EnemyAgent {
    /// Builds an agent whose randomness and noise field are derived from `seed`.
    #[must_use]
    pub fn new(
        id: AgentId,
        config: &AgentConfig,
        seed: u64,
        diagnostics: &dyn Diagnostics,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let noise = Box::new(PerlinNoise::new(rng.gen()));
        Self::assemble(id, config, rng, noise, diagnostics)
    }

    /// Builds an agent steering with an explicit noise field.
    #[must_use]
    pub fn with_noise(
        id: AgentId,
        config: &AgentConfig,
        seed: u64,
        noise: Box<dyn NoiseSource>,
        diagnostics: &dyn Diagnostics,
    ) -> Self {
        Self::assemble(id, config, StdRng::seed_from_u64(seed), noise, diagnostics)
    }

    fn assemble(
        id: AgentId,
        config: &AgentConfig,
        rng: StdRng,
        noise: Box<dyn NoiseSource>,
        diagnostics: &dyn Diagnostics,
    ) -> Self {
        let (core, fault) = match AgentCore::build(config, rng, noise) {
            Ok(core) => {
                info!("{id} spawned as {}", config.name);
                (Some(core), None)
            }
            Err(error) => {
                diagnostics.report(id, &error);
                (None, Some(error))
            }
        };
        Self {
            id,
            name: config.name.clone(),
            core,
            fault,
            opening_complete: false,
        }
    }

    /// Advances the agent by one tick.
    pub fn step(
        &mut self,
        context: &SteeringContext<'_>,
        signals: &TickSignals<'_>,
        dt: f32,
    ) -> AgentOutput {
        let opening_complete = mem::take(&mut self.opening_complete);
        self.core.as_mut().map_or_else(AgentOutput::default, |core| {
            core.step(context, signals, opening_complete, dt)
        })
    }

    /// Delivers the "opening animation complete" event for the next step.
    pub fn signal_opening_complete(&mut self) {
        self.opening_complete = true;
    }

    /// Restarts the cosmetic bob, if any.
    pub fn reset_bob(&mut self) {
        if let Some(bob) = self.core.as_mut().and_then(|core| core.bob.as_mut()) {
            bob.reset();
        }
    }

    /// Identity.
    #[must_use]
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Archetype name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether misconfiguration disabled this agent.
    #[must_use]
    pub const fn is_inert(&self) -> bool {
        self.core.is_none()
    }

    /// The error that disabled this agent, if any.
    #[must_use]
    pub const fn fault(&self) -> Option<&ConfigError> {
        self.fault.as_ref()
    }

    /// The agent's fire gate, if active.
    #[must_use]
    pub fn gate(&self) -> Option<&AttackGate> {
        self.core.as_ref().map(|core| &core.gate)
    }

    /// Whether the agent's weapon is partway through opening.
    #[must_use]
    pub fn is_opening(&self) -> bool {
        matches!(
            self.gate(),
            Some(AttackGate::OpenClose(gate)) if gate.state() == OpenCloseState::Opening
        )
    }

    /// Seconds the weapon takes to open, when the opening is timed.
    #[must_use]
    pub fn opening_time(&self) -> Option<f32> {
        match self.gate() {
            Some(AttackGate::OpenClose(gate)) => gate.opening_time(),
            _ => None,
        }
    }

    /// Current unit aim direction, if active.
    #[must_use]
    pub fn aim_direction(&self) -> Option<Vec2> {
        self.core.as_ref().map(|core| core.aim.direction())
    }

    /// Radius of the neighbour query this agent's solver needs.
    #[must_use]
    pub fn neighbor_radius(&self) -> Option<f32> {
        match self.core.as_ref().map(|core| &core.motion) {
            Some(MotionSolver::Flocking(solver)) => Some(solver.config().query_radius()),
            _ => None,
        }
    }
}
