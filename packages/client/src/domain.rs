//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use crate::error::ClientError;

/// A line typed by the user, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Plain text, inserted at the caret followed by a newline
    Insert(String),
    /// `:lang <name>`
    Lang(String),
    /// `:caret <n>`
    Caret(usize),
    /// `:clear`
    Clear,
    /// `:show`
    Show,
    /// `:quit`
    Quit,
    /// A `:` command that could not be understood
    Unknown(String),
}

/// Decode one input line. Plain text is kept verbatim, indentation included.
pub fn parse_input(line: &str) -> InputCommand {
    let Some(command) = line.trim().strip_prefix(':') else {
        return InputCommand::Insert(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("lang"), Some(lang), None) => InputCommand::Lang(lang.to_string()),
        (Some("caret"), Some(n), None) => match n.parse() {
            Ok(offset) => InputCommand::Caret(offset),
            Err(_) => InputCommand::Unknown(line.trim().to_string()),
        },
        (Some("clear"), None, None) => InputCommand::Clear,
        (Some("show"), None, None) => InputCommand::Show,
        (Some("quit"), None, None) => InputCommand::Quit,
        _ => InputCommand::Unknown(line.trim().to_string()),
    }
}

/// Turn the HTTP base URL into the WebSocket endpoint.
pub fn websocket_url(base_url: &str) -> Result<String, ClientError> {
    let base = base_url.trim_end_matches('/');
    if let Some(rest) = base.strip_prefix("http://") {
        Ok(format!("ws://{}/ws", rest))
    } else if let Some(rest) = base.strip_prefix("https://") {
        Ok(format!("wss://{}/ws", rest))
    } else {
        Err(ClientError::InvalidUrl(base_url.to_string()))
    }
}

/// Check if the client should exit immediately based on the error type.
///
/// Configuration errors will not go away by retrying.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::InvalidUrl(_) | ClientError::RoomCreation(_)
    )
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}
