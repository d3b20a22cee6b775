//! Collaborators that remember what they were given.

use std::sync::Mutex;

use hostile::agent::Diagnostics;
use hostile::attack::{FireRequest, FireSink};
use hostile::entity::AgentId;
use hostile::error::ConfigError;

/// Diagnostics sink keeping every report.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    reports: Mutex<Vec<(AgentId, ConfigError)>>,
}

impl RecordingDiagnostics {
    /// Reports received so far.
    ///
    /// # Panics
    /// Panics if a previous holder of the lock panicked.
    pub fn reports(&self) -> Vec<(AgentId, ConfigError)> {
        self.reports.lock().expect("diagnostics lock").clone()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, agent: AgentId, error: &ConfigError) {
        self.reports
            .lock()
            .expect("diagnostics lock")
            .push((agent, error.clone()));
    }
}

/// Fire sink collecting requests in arrival order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingSink {
    /// Requests received.
    pub requests: Vec<FireRequest>,
}

impl FireSink for RecordingSink {
    fn fire(&mut self, request: &FireRequest) {
        self.requests.push(*request);
    }
}
