//! Server state

use std::sync::Arc;

use crate::app::state::ConsoleSession;

/// Server state shared across handlers
pub struct ServerState {
    pub session: Arc<ConsoleSession>,
}

impl ServerState {
    pub fn new(session: Arc<ConsoleSession>) -> Self {
        Self { session }
    }
}
