//! Terminal I/O for the client.

use std::io::Write;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use crate::domain::{InputCommand, parse_input};

/// Prompt label: the first segment of the room token
pub fn prompt(room: &str) -> String {
    let short = room.split('-').next().unwrap_or(room);
    format!("{}> ", short)
}

/// Redisplay the prompt after printing a notice
pub fn redisplay_prompt(prompt: &str) {
    print!("{}", prompt);
    std::io::stdout().flush().ok();
}

/// Read lines on a blocking thread and forward them as commands.
///
/// The thread lives for the whole process so that it survives reconnects.
/// Ctrl+C and Ctrl+D are forwarded as [`InputCommand::Quit`].
pub fn spawn_input_reader(prompt: String) -> mpsc::UnboundedReceiver<InputCommand> {
    let (input_tx, input_rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            let command = match rl.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str()).ok();
                    }
                    parse_input(&line)
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    InputCommand::Quit
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    InputCommand::Quit
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    InputCommand::Quit
                }
            };

            let quit = command == InputCommand::Quit;
            if input_tx.send(command).is_err() || quit {
                break;
            }
        }
    });

    input_rx
}
