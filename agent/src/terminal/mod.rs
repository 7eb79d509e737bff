//! Interactive terminal view of a console session.
//!
//! Lines read from the input are either console commands (prefixed with `:`)
//! or deployment requests handed to the session.

pub mod render;
pub mod repl;

use crate::models::panels::View;

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Hand the text to the timeline runner
    Submit(String),

    /// Switch the output tab
    SwitchView(View),

    /// Print the command list
    Help,

    /// End the session
    Quit,
}

impl ConsoleCommand {
    /// Parse one input line. Anything that is not a known `:` command is a
    /// deployment request, passed through untrimmed.
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            ":quit" | ":exit" | ":q" => ConsoleCommand::Quit,
            ":help" | ":h" => ConsoleCommand::Help,
            ":terminal" => ConsoleCommand::SwitchView(View::Terminal),
            ":preview" => ConsoleCommand::SwitchView(View::Preview),
            _ => ConsoleCommand::Submit(line.to_string()),
        }
    }
}
