//! Coderoom terminal client with reconnection support.
//!
//! Joins a room (or creates one), inserts typed lines at the caret and keeps
//! the buffer in sync with the other members of the room. Local edits are sent
//! as full snapshots after a short quiescence window.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin coderoom-client
//! cargo run --bin coderoom-client -- --room 1b4e28ba-2fa1-11d2-883f-0016d3cca427 --lang python
//! ```

use std::time::Duration;

use clap::Parser;

use coderoom_client::{ClientConfig, run_client};
use coderoom_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "coderoom-client")]
#[command(about = "Terminal client for collaborative Coderoom rooms", long_about = None)]
struct Args {
    /// HTTP base URL of the server
    #[arg(short = 'u', long, default_value = "http://127.0.0.1:8080")]
    url: String,

    /// Room token to join (a new room is created when omitted)
    #[arg(short = 'r', long)]
    room: Option<String>,

    /// Initial language
    #[arg(short = 'l', long, default_value = "javascript")]
    lang: String,

    /// Quiescence window in milliseconds before local edits are sent
    #[arg(long, default_value = "200")]
    debounce_ms: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let config = ClientConfig {
        url: args.url,
        room: args.room,
        lang: args.lang,
        debounce: Duration::from_millis(args.debounce_ms),
    };

    // Run the client
    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
