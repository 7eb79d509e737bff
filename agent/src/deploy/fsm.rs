//! Finite State Machine for the timeline runner

use serde::{Deserialize, Serialize};

/// Runner state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunnerState {
    /// Waiting for a command
    #[default]
    Idle,

    /// Playing back the step script
    Running,
}

/// Runner event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerEvent {
    /// A command was accepted
    Submit,

    /// The last step fired
    Complete,

    /// The owning session was disposed mid-run
    Cancel,
}

/// Runner FSM
#[derive(Debug, Clone, Default)]
pub struct RunnerFsm {
    state: RunnerState,
    runs_completed: u64,
}

impl RunnerFsm {
    /// Create a new FSM in idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current state
    pub fn state(&self) -> RunnerState {
        self.state
    }

    /// Number of runs that played to the last step
    pub fn runs_completed(&self) -> u64 {
        self.runs_completed
    }

    /// Process an event and transition state
    pub fn process(&mut self, event: RunnerEvent) -> Result<(), String> {
        let new_state = match (self.state, event) {
            (RunnerState::Idle, RunnerEvent::Submit) => RunnerState::Running,
            (RunnerState::Running, RunnerEvent::Complete) => {
                self.runs_completed += 1;
                RunnerState::Idle
            }
            (RunnerState::Running, RunnerEvent::Cancel) => RunnerState::Idle,

            // Invalid transitions
            (state, event) => {
                return Err(format!("Invalid transition: {:?} -> {:?}", state, event));
            }
        };

        self.state = new_state;
        Ok(())
    }
}
