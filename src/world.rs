//! Fixed-step driver owning every agent, its body and the arena.
//!
//! Each tick captures a snapshot of all bodies before any agent moves, so
//! steering never reads partially updated state. Neighbours report the
//! velocity their agent steered with, without recoil. The world also stands
//! in for the animation system: timed open/close weapons are told their
//! opening finished once the configured time has passed.

use glam::Vec2;
use hashbrown::HashMap;
use log::{debug, info};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::agent::{
    AgentConfig, AgentOutput, Diagnostics, EnemyAgent, LogDiagnostics, TickSignals,
};
use crate::aim::Facing;
use crate::arena::Arena;
use crate::attack::FireRequest;
use crate::constants::{NEIGHBOR_CAPACITY, RECOIL_DAMPING, RECOIL_MASS, TIMER_EPSILON};
use crate::entity::{AgentId, Body};
use crate::steering::{Neighbor, SteeringContext};

struct Slot {
    agent: EnemyAgent,
    body: Body,
    recoil: Vec2,
    steering: Vec2,
    moving: bool,
    opening_elapsed: f32,
    shots_fired: u64,
}

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Tick number, starting at one.
    pub tick: u64,
    /// Simulation time at which the tick was evaluated.
    pub time: f32,
    /// Every fire request produced this tick, in agent order.
    pub fire_requests: Vec<FireRequest>,
    /// Per-agent output, in agent order.
    pub outputs: Vec<(AgentId, AgentOutput)>,
}

/// Agents, their bodies and the arena they fight in.
pub struct World {
    slots: HashMap<AgentId, Slot>,
    order: Vec<AgentId>,
    next_id: u32,
    arena: Arena,
    time: f32,
    tick_count: u64,
    rng: StdRng,
    diagnostics: Box<dyn Diagnostics>,
}

impl World {
    /// Creates an empty world reporting misconfiguration through the log.
    #[must_use]
    pub fn new(arena: Arena, seed: u64) -> Self {
        Self::with_diagnostics(arena, seed, Box::new(LogDiagnostics))
    }

    /// Creates an empty world with an explicit diagnostics sink.
    #[must_use]
    pub fn with_diagnostics(arena: Arena, seed: u64, diagnostics: Box<dyn Diagnostics>) -> Self {
        Self {
            slots: HashMap::new(),
            order: Vec::new(),
            next_id: 0,
            arena,
            time: 0.0,
            tick_count: 0,
            rng: StdRng::seed_from_u64(seed),
            diagnostics,
        }
    }

    /// Adds an agent at `position` and returns its id.
    ///
    /// Misconfigured agents are still spawned, inert, after being reported.
    pub fn spawn(&mut self, config: &AgentConfig, position: Vec2) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        let agent = EnemyAgent::new(id, config, self.rng.gen(), self.diagnostics.as_ref());
        self.slots.insert(
            id,
            Slot {
                agent,
                body: Body::at(position),
                recoil: Vec2::ZERO,
                steering: Vec2::ZERO,
                moving: false,
                opening_elapsed: 0.0,
                shots_fired: 0,
            },
        );
        self.order.push(id);
        id
    }

    /// Removes an agent, returning it if it existed.
    pub fn despawn(&mut self, id: AgentId) -> Option<EnemyAgent> {
        let slot = self.slots.remove(&id)?;
        self.order.retain(|other| *other != id);
        info!("{id} despawned");
        Some(slot.agent)
    }

    /// Moves the target.
    pub fn set_target(&mut self, target: Vec2) {
        self.arena.set_target(target);
    }

    /// Current target position.
    #[must_use]
    pub const fn target(&self) -> Vec2 {
        self.arena.target()
    }

    /// Delivers an "opening complete" event to `id` for the next tick.
    ///
    /// Returns `false` when no such agent exists.
    pub fn signal_opening_complete(&mut self, id: AgentId) -> bool {
        self.slots.get_mut(&id).map_or(false, |slot| {
            slot.agent.signal_opening_complete();
            true
        })
    }

    /// Looks up an agent.
    #[must_use]
    pub fn agent(&self, id: AgentId) -> Option<&EnemyAgent> {
        self.slots.get(&id).map(|slot| &slot.agent)
    }

    /// Looks up an agent's body.
    #[must_use]
    pub fn body(&self, id: AgentId) -> Option<&Body> {
        self.slots.get(&id).map(|slot| &slot.body)
    }

    /// Projectiles fired by `id` so far.
    #[must_use]
    pub fn shots_fired(&self, id: AgentId) -> Option<u64> {
        self.slots.get(&id).map(|slot| slot.shots_fired)
    }

    /// Agent ids in spawn order.
    #[must_use]
    pub fn ids(&self) -> &[AgentId] {
        &self.order
    }

    /// Number of live agents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the world holds no agents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Simulation time of the next tick.
    #[must_use]
    pub const fn time(&self) -> f32 {
        self.time
    }

    /// Ticks run so far.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Advances every agent by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        self.tick_count += 1;
        let now = self.time;
        let snapshot = self.snapshot();
        let target = self.arena.target();
        let mut report = TickReport {
            tick: self.tick_count,
            time: now,
            ..TickReport::default()
        };

        for id in &self.order {
            let Some(slot) = self.slots.get_mut(id) else {
                continue;
            };
            let position = slot.body.position;
            let neighbors = slot
                .agent
                .neighbor_radius()
                .map(|radius| nearest_neighbors(&snapshot, *id, position, radius))
                .unwrap_or_default();
            let context = SteeringContext::toward(position, target, &neighbors, now);
            let signals = TickSignals {
                is_moving: slot.moving,
                sight: &self.arena,
            };
            let output = slot.agent.step(&context, &signals, dt);
            integrate(slot, &output, dt);
            advance_opening(slot, dt);
            output.emit(&mut report.fire_requests);
            report.outputs.push((*id, output));
        }

        if !report.fire_requests.is_empty() {
            debug!(
                "tick {} fired {} projectiles",
                report.tick,
                report.fire_requests.len()
            );
        }
        self.time += dt;
        report
    }

    fn snapshot(&self) -> Vec<Neighbor> {
        self.order
            .iter()
            .filter_map(|id| {
                self.slots.get(id).map(|slot| Neighbor {
                    id: *id,
                    position: slot.body.position,
                    velocity: slot.steering,
                })
            })
            .collect()
    }
}

fn integrate(slot: &mut Slot, output: &AgentOutput, dt: f32) {
    if let Some(impulse) = output.recoil {
        slot.recoil += impulse / RECOIL_MASS;
    }
    slot.steering = output.velocity();
    let velocity = slot.steering + slot.recoil;
    slot.body.velocity = velocity;
    slot.body.position += velocity * dt;
    slot.recoil *= (-RECOIL_DAMPING * dt).exp();
    slot.moving = slot.body.is_moving();
    if let Some(Facing::Flip { flip_x }) = output.facing {
        slot.body.flip_x = Some(flip_x);
    }
    slot.shots_fired += u64::try_from(output.fire_requests.len()).unwrap_or(u64::MAX);
}

/// Counts down a timed opening and raises the completion signal for the
/// agent's next step.
fn advance_opening(slot: &mut Slot, dt: f32) {
    let Some(duration) = slot.agent.opening_time() else {
        return;
    };
    if !slot.agent.is_opening() {
        slot.opening_elapsed = 0.0;
        return;
    }
    slot.opening_elapsed += dt;
    if slot.opening_elapsed + TIMER_EPSILON >= duration {
        debug!("{} finished opening", slot.agent.id());
        slot.opening_elapsed = 0.0;
        slot.agent.signal_opening_complete();
    }
}

/// Peers of `id` within `radius` of `position`, nearest first, at most
/// [`NEIGHBOR_CAPACITY`] of them.
#[must_use]
pub fn nearest_neighbors(
    snapshot: &[Neighbor],
    id: AgentId,
    position: Vec2,
    radius: f32,
) -> Vec<Neighbor> {
    let mut found: Vec<Neighbor> = snapshot
        .iter()
        .filter(|n| n.id != id && n.position.distance(position) <= radius)
        .copied()
        .collect();
    found.sort_by_key(|n| OrderedFloat(n.position.distance_squared(position)));
    found.truncate(NEIGHBOR_CAPACITY);
    found
}
