//! Text rendering of the console

use colored::Colorize;

use crate::models::log_entry::{LogEntry, Severity};
use crate::models::panels::{
    View, ACTIVE_DEPLOYMENTS, ENVIRONMENT, INPUT_PLACEHOLDER, PREVIEW_PLACEHOLDER, PRODUCT_NAME,
    PRODUCT_SUFFIX, SYSTEM_STATUS,
};

pub const HELP: &str = "Commands: :terminal, :preview, :help, :quit. Anything else is a deployment request.";

/// Header status bar
pub fn render_header() -> String {
    format!(
        "{}{}  {} {}\n",
        PRODUCT_NAME.bold(),
        PRODUCT_SUFFIX.bold().cyan(),
        "●".green(),
        SYSTEM_STATUS.green()
    )
}

/// Environment and active deployments panels
pub fn render_panels() -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "ENVIRONMENT".dimmed()));
    for item in ENVIRONMENT.iter() {
        out.push_str(&format!("  {:<14}{}\n", item.label, item.value.bold()));
    }
    out.push_str(&format!("{}\n", "ACTIVE DEPLOYMENTS".dimmed()));
    for deployment in ACTIVE_DEPLOYMENTS.iter() {
        let dot = if deployment.healthy {
            "●".green()
        } else {
            "●".red()
        };
        out.push_str(&format!(
            "  {} {}  {}\n",
            dot,
            deployment.name.bold(),
            deployment.age.dimmed()
        ));
    }
    out
}

/// Tab bar with the active tab highlighted
pub fn render_tabs(active: View) -> String {
    let tab = |view: View| {
        if view == active {
            format!("[{}]", view.title()).bold().to_string()
        } else {
            format!(" {} ", view.title()).dimmed().to_string()
        }
    };
    format!("{} {}\n", tab(View::Terminal), tab(View::Preview))
}

/// One log line: `[HH:MM:SS] message`, colored by severity
pub fn render_entry(entry: &LogEntry) -> String {
    let icon = match entry.severity {
        Severity::Success => "✔ ",
        Severity::Error => "✖ ",
        Severity::Info | Severity::Warning => "",
    };
    let text = format!("{}{}", icon, entry.message);
    let text = match entry.severity {
        Severity::Error => text.red(),
        Severity::Success => text.green(),
        Severity::Warning => text.yellow(),
        Severity::Info => text.normal(),
    };
    format!("{} {}\n", format!("[{}]", entry.timestamp).dimmed(), text)
}

/// The whole log in order
pub fn render_log(entries: &[LogEntry]) -> String {
    entries.iter().map(render_entry).collect()
}

/// Static preview tab body
pub fn render_preview() -> String {
    format!("\n  {}\n\n", PREVIEW_PLACEHOLDER.dimmed())
}

/// Input indicator; spins while a run is playing
pub fn render_prompt(is_running: bool) -> String {
    if is_running {
        format!("{} ", "⠿".cyan())
    } else {
        format!("{} ", "⌘".dimmed())
    }
}

/// First screen of a session
pub fn render_welcome() -> String {
    format!(
        "{}{}{}\n",
        render_header(),
        render_panels(),
        INPUT_PLACEHOLDER.dimmed()
    )
}
