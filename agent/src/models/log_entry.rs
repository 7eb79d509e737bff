//! Log entry models

use serde::{Deserialize, Serialize};

/// Display classification of a log line.
///
/// Purely presentational: it picks the color and icon of a line and never
/// influences control flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single line of the console log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Rendering key, unique within the session
    pub id: String,

    /// Wall-clock append time, `HH:MM:SS`
    pub timestamp: String,

    /// Display text
    pub message: String,

    /// Display severity
    #[serde(rename = "type")]
    pub severity: Severity,
}
