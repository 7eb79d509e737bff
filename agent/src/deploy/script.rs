//! The fixed deployment step script

use std::time::Duration;

use crate::models::log_entry::Severity;

/// One scripted status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployStep {
    /// Line appended when the step fires
    pub message: &'static str,

    /// Absolute offset from submission
    pub offset: Duration,

    pub severity: Severity,
}

impl DeployStep {
    const fn info(message: &'static str, offset_ms: u64) -> Self {
        Self {
            message,
            offset: Duration::from_millis(offset_ms),
            severity: Severity::Info,
        }
    }

    const fn success(message: &'static str, offset_ms: u64) -> Self {
        Self {
            message,
            offset: Duration::from_millis(offset_ms),
            severity: Severity::Success,
        }
    }
}

/// Replayed identically for every accepted command. Offsets strictly increase.
pub static DEPLOY_SCRIPT: [DeployStep; 7] = [
    DeployStep::info("Analyzing requirements with Gemini Pro...", 800),
    DeployStep::info("Generating React component structure...", 1500),
    DeployStep::info("Creating src/components/Dashboard.tsx...", 2200),
    DeployStep::info("Optimizing assets and bundling...", 3000),
    DeployStep::info("Verifying build integrity...", 3800),
    DeployStep::info("Deploying to Vercel Edge Network...", 4500),
    DeployStep::success(
        "Deployment successful! Available at https://autodeploy-agent.vercel.app",
        5500,
    ),
];

/// Echo line for an accepted command
pub fn echo_line(command: &str) -> String {
    format!("> {}", command)
}

/// Delay between the previous step (or submission) and each step, in order
pub fn step_delays(script: &[DeployStep]) -> impl Iterator<Item = (Duration, &DeployStep)> {
    let mut previous = Duration::ZERO;
    script.iter().map(move |step| {
        let delay = step.offset.saturating_sub(previous);
        previous = step.offset;
        (delay, step)
    })
}
