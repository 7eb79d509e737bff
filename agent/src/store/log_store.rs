//! Append-only console log

use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;
use tracing::trace;

use crate::models::log_entry::{LogEntry, Severity};
use crate::utils::{clock_now, generate_uuid};

/// Buffered notifications per subscriber before it starts lagging
const NOTIFY_CAPACITY: usize = 256;

/// Append-only, insertion-ordered log of the current session.
///
/// Cheap to clone; clones share the same entries. Entries are never mutated or
/// removed and `read_all` always returns them in append order. Every append is
/// also published to subscribers so views can render the newest line.
#[derive(Clone)]
pub struct LogStore {
    entries: Arc<RwLock<Vec<LogEntry>>>,
    notify: broadcast::Sender<LogEntry>,
}

impl LogStore {
    /// Create an empty store
    pub fn new() -> Self {
        let (notify, _) = broadcast::channel(NOTIFY_CAPACITY);
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            notify,
        }
    }

    /// Append an entry stamped with the current wall-clock time
    pub fn append(&self, message: impl Into<String>, severity: Severity) -> LogEntry {
        let entry = LogEntry {
            id: generate_uuid(),
            timestamp: clock_now(),
            message: message.into(),
            severity,
        };

        {
            let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
            entries.push(entry.clone());
        }
        trace!("Appended {} entry: {}", entry.severity, entry.message);

        // No subscribers is fine
        let _ = self.notify.send(entry.clone());
        entry
    }

    /// Append an `info` entry
    pub fn append_info(&self, message: impl Into<String>) -> LogEntry {
        self.append(message, Severity::Info)
    }

    /// All entries in append order
    pub fn read_all(&self) -> Vec<LogEntry> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.clone()
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Receive every entry appended after this call
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.notify.subscribe()
    }
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new()
    }
}
