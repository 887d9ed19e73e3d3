//! Special commands parser for interactive chat mode
//!
//! Special commands are prefixed with `/` and are case-insensitive. They act
//! on the session itself and are never sent to the assistant. The bare words
//! `exit` and `quit` also end the session.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Display help information
    Help,

    /// Re-render the whole transcript
    History,

    /// Show message count and backend URL
    ShowStatus,

    /// Exit the interactive session
    Exit,

    /// Not a special command; submit the input to the assistant
    None,
}

/// Parse user input into a special command
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` for `/`-prefixed input that is
/// not a known command
///
/// # Examples
///
/// ```
/// use taskmate::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/help"), Ok(SpecialCommand::Help));
/// assert_eq!(parse_special_command("Plan May 2026"), Ok(SpecialCommand::None));
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    match lower.as_str() {
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/history" | "/transcript" => Ok(SpecialCommand::History),
        "/status" => Ok(SpecialCommand::ShowStatus),
        "/exit" | "/quit" | "exit" | "quit" => Ok(SpecialCommand::Exit),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print help for interactive chat mode
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat Mode
===========================================

  /help           - Show this help
  /history        - Show the whole conversation again
  /status         - Show session information
  /exit, exit     - Leave the chat

ASKING FOR A SCHEDULE:
  Mention a full month name and a four digit year, for example:
    How should I arrange my tasks in September 2025?
"#
    );
}
