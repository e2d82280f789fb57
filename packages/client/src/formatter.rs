//! Message formatting utilities for client display.

use crate::synchronizer::RemoteChange;

/// Marker printed at the caret position
const CARET_MARKER: char = '|';

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Banner shown once the room is known
    pub fn format_welcome(room: &str, base_url: &str) -> String {
        format!(
            "\nRoom {room}\nShare it: {base}/{room}\n\
             Type lines to insert them at the caret. Commands: :lang <name>, :caret <n>, :clear, :show, :quit\n",
            room = room,
            base = base_url.trim_end_matches('/'),
        )
    }

    /// Format the buffer with the caret marker
    ///
    /// # Arguments
    ///
    /// * `buffer` - Current buffer content
    /// * `caret` - Caret offset in chars
    /// * `lang` - Active language
    pub fn format_buffer(buffer: &str, caret: usize, lang: &str) -> String {
        let mut marked = String::with_capacity(buffer.len() + 1);
        let mut placed = false;
        for (i, ch) in buffer.chars().enumerate() {
            if i == caret {
                marked.push(CARET_MARKER);
                placed = true;
            }
            marked.push(ch);
        }
        if !placed {
            marked.push(CARET_MARKER);
        }

        format!(
            "\n------------------------------------------------------------ [{}]\n{}\n------------------------------------------------------------\n",
            lang, marked
        )
    }

    /// Format a notice for an event relayed from a peer
    pub fn format_remote_change(change: &RemoteChange, caret: usize) -> String {
        match change {
            RemoteChange::Code { chars, lang } => format!(
                "\n< buffer updated by a peer ({} chars, {}), caret at {}\n",
                chars, lang, caret
            ),
            RemoteChange::Lang { lang } => format!("\n< language set to {} by a peer\n", lang),
        }
    }

    /// Format the confirmation of an outgoing event
    pub fn format_sent(kind: &str) -> String {
        format!("\n> {} sent\n", kind)
    }

    pub fn format_unknown_command(line: &str) -> String {
        format!("\nUnknown command: {}\n", line)
    }
}
