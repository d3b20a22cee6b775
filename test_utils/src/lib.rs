//! Shared fixtures for the `hostile` integration tests.
//!
//! Stubs for the collaborators an agent talks to (line of sight, noise,
//! diagnostics, fire sink) plus small builders for steering snapshots.
pub mod recorders;
pub mod sight;
pub mod steering;

pub use recorders::{RecordingDiagnostics, RecordingSink};
pub use sight::{CountingSight, FixedSight};
pub use steering::{neighbor, neighbor_moving, ring, FlatNoise};
