//! Read-only per-tick snapshot handed to the motion solvers.
use glam::Vec2;

use crate::entity::AgentId;
use crate::vector_math::normalize_or_zero;

/// A nearby peer as captured at the start of the tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    /// Identity of the peer.
    pub id: AgentId,
    /// Peer position at the start of the tick.
    pub position: Vec2,
    /// Peer velocity applied during the previous tick.
    pub velocity: Vec2,
}

/// Target query results and neighbour view for one agent and one tick.
///
/// The neighbour slice is borrowed from a snapshot taken before any agent in
/// the group moved, so every agent sees the same prior-tick state.
#[derive(Clone, Copy, Debug)]
pub struct SteeringContext<'a> {
    /// Position of the agent being solved for.
    pub position: Vec2,
    /// Distance to the target.
    pub target_distance: f32,
    /// Unit vector toward the target, or zero when the target coincides.
    pub target_direction: Vec2,
    /// Peers near the agent, never including the agent itself.
    pub neighbors: &'a [Neighbor],
    /// Simulation time in seconds.
    pub time: f32,
}

impl<'a> SteeringContext<'a> {
    /// Builds a context from an explicit target distance and direction.
    #[must_use]
    pub fn new(
        position: Vec2,
        target_distance: f32,
        target_direction: Vec2,
        neighbors: &'a [Neighbor],
        time: f32,
    ) -> Self {
        Self {
            position,
            target_distance,
            target_direction: normalize_or_zero(target_direction),
            neighbors,
            time,
        }
    }

    /// Builds a context by measuring the offset from `position` to `target`.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec2;
    /// use hostile::steering::SteeringContext;
    /// let ctx = SteeringContext::toward(Vec2::ZERO, Vec2::new(0.0, 4.0), &[], 0.0);
    /// assert!((ctx.target_distance - 4.0).abs() < 1e-6);
    /// assert_eq!(ctx.target_direction, Vec2::Y);
    /// ```
    #[must_use]
    pub fn toward(position: Vec2, target: Vec2, neighbors: &'a [Neighbor], time: f32) -> Self {
        let offset = target - position;
        Self::new(position, offset.length(), offset, neighbors, time)
    }
}
