//! Console session state

use std::sync::{Mutex, RwLock};

use serde::Serialize;
use tracing::info;

use crate::deploy::runner::{Submission, TimelineRunner};
use crate::models::log_entry::{LogEntry, Severity};
use crate::models::panels::{
    ActiveDeployment, EnvironmentItem, View, ACTIVE_DEPLOYMENTS, ENVIRONMENT, INPUT_PLACEHOLDER,
    PRODUCT_NAME, PRODUCT_SUFFIX, SYSTEM_STATUS,
};
use crate::store::log_store::LogStore;

/// Session options
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Version shown in the greeting
    pub version: String,

    /// Append the greeting lines on start
    pub greeting: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            greeting: true,
        }
    }
}

/// One console session: the log, the runner, the input line and the active tab.
///
/// Views read and mutate the session only through these methods.
pub struct ConsoleSession {
    store: LogStore,
    runner: TimelineRunner,
    input: Mutex<String>,
    active_view: RwLock<View>,
}

impl ConsoleSession {
    /// Start a session
    pub fn start(options: SessionOptions) -> Self {
        let store = LogStore::new();
        let runner = TimelineRunner::new(store.clone());
        let session = Self {
            store,
            runner,
            input: Mutex::new(String::new()),
            active_view: RwLock::new(View::default()),
        };

        if options.greeting {
            session.greet(&options.version);
        }

        info!("Console session started");
        session
    }

    fn greet(&self, version: &str) {
        self.store.append(
            format!("{} {} v{} initialized.", PRODUCT_NAME, PRODUCT_SUFFIX, version),
            Severity::Success,
        );
        self.store.append("Connected to Google GenAI Service.", Severity::Info);
        self.store.append("Waiting for user instructions...", Severity::Warning);
    }

    pub fn store(&self) -> &LogStore {
        &self.store
    }

    pub fn runner(&self) -> &TimelineRunner {
        &self.runner
    }

    /// All log entries in append order
    pub fn entries(&self) -> Vec<LogEntry> {
        self.store.read_all()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        let mut input = self.input.lock().unwrap_or_else(|e| e.into_inner());
        *input = text.into();
    }

    pub fn input(&self) -> String {
        self.input.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Submit the current input line, clearing it when accepted
    pub fn submit_input(&self) -> Submission {
        let mut input = self.input.lock().unwrap_or_else(|e| e.into_inner());
        let submission = self.runner.submit(&input);
        if submission.is_accepted() {
            input.clear();
        }
        submission
    }

    /// Submit `text` directly. The input line is cleared on acceptance and
    /// left alone on rejection.
    pub fn submit(&self, text: &str) -> Submission {
        let mut input = self.input.lock().unwrap_or_else(|e| e.into_inner());
        let submission = self.runner.submit(text);
        if submission.is_accepted() {
            input.clear();
        }
        submission
    }

    pub fn is_running(&self) -> bool {
        self.runner.is_running()
    }

    pub fn select_view(&self, view: View) {
        let mut active = self.active_view.write().unwrap_or_else(|e| e.into_inner());
        if *active != view {
            info!("Switching view to {:?}", view);
            *active = view;
        }
    }

    pub fn active_view(&self) -> View {
        *self.active_view.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Everything a view needs to draw the console
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            title: format!("{}{}", PRODUCT_NAME, PRODUCT_SUFFIX),
            status: SYSTEM_STATUS,
            environment: ENVIRONMENT.to_vec(),
            active_deployments: ACTIVE_DEPLOYMENTS.to_vec(),
            active_view: self.active_view(),
            is_running: self.is_running(),
            input: self.input(),
            input_placeholder: INPUT_PLACEHOLDER,
            entries: self.entries(),
        }
    }

    /// Stop any in-flight playback; the session accepts no more commands
    pub fn dispose(&self) {
        info!("Disposing console session");
        self.runner.dispose();
    }
}

/// Serializable view of a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub title: String,
    pub status: &'static str,
    pub environment: Vec<EnvironmentItem>,
    pub active_deployments: Vec<ActiveDeployment>,
    pub active_view: View,
    pub is_running: bool,
    pub input: String,
    pub input_placeholder: &'static str,
    pub entries: Vec<LogEntry>,
}
