//! JSON scenario files describing a demo encounter.
//!
//! ```json
//! {
//!   "seed": 7,
//!   "target": [0.0, 0.0],
//!   "spawns": [
//!     { "preset": "airship", "position": [20.0, 5.0] },
//!     { "config": { "name": "scout", "move_speed": 5.0 }, "position": [-8.0, 0.0] }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use glam::Vec2;
use log::info;
use serde::{Deserialize, Serialize};

use crate::agent::AgentConfig;
use crate::arena::{Arena, Wall};
use crate::constants::DEFAULT_FIXED_STEP;
use crate::world::World;

/// Archetype of a spawned agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpawnKind {
    /// A built-in archetype by name.
    Preset {
        /// One of `floater`, `airship`, `sphere`, `drifter`.
        preset: String,
    },
    /// A fully specified agent.
    Custom {
        /// Agent settings.
        config: AgentConfig,
    },
}

/// One agent placed in the scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    /// Archetype.
    #[serde(flatten)]
    pub kind: SpawnKind,
    /// Starting position.
    pub position: Vec2,
}

impl Spawn {
    /// Resolves the archetype into a concrete configuration.
    ///
    /// # Errors
    /// Fails when a preset name is unknown.
    pub fn resolve(&self) -> Result<AgentConfig> {
        match &self.kind {
            SpawnKind::Preset { preset } => {
                AgentConfig::preset(preset).ok_or_else(|| anyhow!("unknown preset `{preset}`"))
            }
            SpawnKind::Custom { config } => Ok(config.clone()),
        }
    }
}

/// A complete demo encounter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Seed for every agent's randomness.
    pub seed: u64,
    /// Fixed simulation step in seconds.
    pub dt: f32,
    /// Target position.
    pub target: Vec2,
    /// Target collision radius.
    pub target_radius: f32,
    /// Sight-blocking walls.
    pub walls: Vec<Wall>,
    /// Agents to spawn.
    pub spawns: Vec<Spawn>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            seed: 0,
            dt: DEFAULT_FIXED_STEP,
            target: Vec2::ZERO,
            target_radius: 0.5,
            walls: Vec::new(),
            spawns: Vec::new(),
        }
    }
}

impl Scenario {
    /// Parses a scenario from JSON text.
    ///
    /// # Errors
    /// Returns an error when the JSON is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid scenario JSON")
    }

    /// Reads and parses a scenario file.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Built-in encounter with one of each archetype around a walled target.
    #[must_use]
    pub fn skirmish() -> Self {
        let preset = |name: &str, x: f32, y: f32| Spawn {
            kind: SpawnKind::Preset {
                preset: name.to_owned(),
            },
            position: Vec2::new(x, y),
        };
        Self {
            seed: 7,
            walls: vec![Wall {
                start: Vec2::new(-4.0, 6.0),
                end: Vec2::new(4.0, 6.0),
            }],
            spawns: vec![
                preset("floater", 12.0, 3.0),
                preset("floater", 13.0, -2.0),
                preset("floater", 11.0, 0.5),
                preset("airship", -20.0, 8.0),
                preset("sphere", 0.0, -15.0),
                preset("drifter", -30.0, -4.0),
            ],
            ..Self::default()
        }
    }

    /// Builds a world holding every spawn.
    ///
    /// # Errors
    /// Fails on an unknown preset name.
    pub fn build_world(&self) -> Result<World> {
        let arena = Arena::with_walls(self.target, self.target_radius, self.walls.clone());
        let mut world = World::new(arena, self.seed);
        for spawn in &self.spawns {
            let config = spawn.resolve()?;
            world.spawn(&config, spawn.position);
        }
        info!(
            "scenario ready: {} agents, {} walls",
            world.len(),
            self.walls.len()
        );
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_preset_and_custom_spawns() {
        let scenario = Scenario::from_json_str(
            r#"{
                "seed": 3,
                "spawns": [
                    { "preset": "sphere", "position": [1.0, 2.0] },
                    { "config": { "name": "scout", "move_speed": 5.0 }, "position": [0.0, 0.0] }
                ]
            }"#,
        )
        .expect("scenario should parse");
        assert_eq!(scenario.seed, 3);
        assert_eq!(scenario.spawns.len(), 2);
        let custom = scenario
            .spawns
            .get(1)
            .expect("second spawn")
            .resolve()
            .expect("custom config resolves");
        assert_eq!(custom.name, "scout");
    }

    #[test]
    fn unknown_preset_fails_to_resolve() {
        let spawn = Spawn {
            kind: SpawnKind::Preset {
                preset: "dragon".to_owned(),
            },
            position: Vec2::ZERO,
        };
        let err = spawn.resolve().expect_err("dragon is not a preset");
        assert!(err.to_string().contains("dragon"));
    }

    #[test]
    fn skirmish_builds_every_agent() {
        let world = Scenario::skirmish().build_world().expect("skirmish builds");
        assert_eq!(world.len(), 6);
        assert!(world.ids().iter().all(|id| {
            world.agent(*id).is_some_and(|agent| !agent.is_inert())
        }));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Scenario::from_json_str("{ not json").is_err());
    }
}
