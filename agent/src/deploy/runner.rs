//! Timeline runner
//!
//! Plays the step script once per accepted command. Each step's sleep is armed
//! only after the previous step was appended, so lines always land in script
//! order. A second command while a run is in flight is rejected, not queued.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::deploy::fsm::{RunnerEvent, RunnerFsm, RunnerState};
use crate::deploy::script::{echo_line, step_delays, DEPLOY_SCRIPT};
use crate::store::log_store::LogStore;

/// Outcome of a submission. Rejections never touch the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    Rejected(RejectReason),
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Nothing but whitespace was submitted
    EmptyCommand,

    /// A run is already playing
    AlreadyRunning,

    /// The owning session was disposed
    Disposed,
}

/// Timeline runner bound to one log store
pub struct TimelineRunner {
    store: LogStore,
    fsm: Arc<watch::Sender<RunnerFsm>>,
    disposed: CancellationToken,
}

impl TimelineRunner {
    /// Create an idle runner appending to `store`
    pub fn new(store: LogStore) -> Self {
        let (fsm, _) = watch::channel(RunnerFsm::new());
        Self {
            store,
            fsm: Arc::new(fsm),
            disposed: CancellationToken::new(),
        }
    }

    /// Current runner state
    pub fn state(&self) -> RunnerState {
        self.fsm.borrow().state()
    }

    pub fn is_running(&self) -> bool {
        self.state() == RunnerState::Running
    }

    /// Number of runs that played to the last step
    pub fn runs_completed(&self) -> u64 {
        self.fsm.borrow().runs_completed()
    }

    /// Watch state transitions
    pub fn subscribe(&self) -> watch::Receiver<RunnerFsm> {
        self.fsm.subscribe()
    }

    /// Submit a command. Must be called from within a tokio runtime.
    pub fn submit(&self, command: &str) -> Submission {
        if command.trim().is_empty() {
            debug!("Ignoring empty command");
            return Submission::Rejected(RejectReason::EmptyCommand);
        }

        if self.disposed.is_cancelled() {
            debug!("Ignoring command on disposed runner");
            return Submission::Rejected(RejectReason::Disposed);
        }

        // Check-and-set under the channel lock so two callers cannot both win.
        // The echo lands before state watchers are woken.
        let accepted = self.fsm.send_if_modified(|fsm| {
            if fsm.process(RunnerEvent::Submit).is_err() {
                return false;
            }
            self.store.append_info(echo_line(command));
            true
        });
        if !accepted {
            debug!("Ignoring command while a run is in progress");
            return Submission::Rejected(RejectReason::AlreadyRunning);
        }

        info!("Accepted command: {}", command);

        tokio::spawn(play(
            self.store.clone(),
            self.fsm.clone(),
            self.disposed.child_token(),
        ));

        Submission::Accepted
    }

    /// Resolve once the runner is idle
    pub async fn wait_until_idle(&self) {
        let mut rx = self.fsm.subscribe();
        // The sender lives in `self`, so the channel cannot close here
        let _ = rx.wait_for(|fsm| fsm.state() == RunnerState::Idle).await;
    }

    /// Cancel any in-flight run and refuse further commands
    pub fn dispose(&self) {
        if !self.disposed.is_cancelled() {
            debug!("Disposing timeline runner");
            self.disposed.cancel();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.is_cancelled()
    }
}

impl Drop for TimelineRunner {
    fn drop(&mut self) {
        self.disposed.cancel();
    }
}

async fn play(store: LogStore, fsm: Arc<watch::Sender<RunnerFsm>>, cancel: CancellationToken) {
    for (index, (delay, step)) in step_delays(&DEPLOY_SCRIPT).enumerate() {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("Run cancelled before step {}", index);
                fsm.send_modify(|fsm| {
                    if let Err(e) = fsm.process(RunnerEvent::Cancel) {
                        warn!("{}", e);
                    }
                });
                return;
            }
            _ = tokio::time::sleep(delay) => {}
        }

        debug!("Step {} fired after {:?}", index, delay);
        store.append(step.message, step.severity);
    }

    fsm.send_modify(|fsm| {
        if let Err(e) = fsm.process(RunnerEvent::Complete) {
            warn!("{}", e);
        }
    });
    info!("Run completed");
}
