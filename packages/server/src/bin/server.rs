//! Coderoom relay server.
//!
//! Relays buffer snapshots and language changes between the members of each room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin coderoom-server
//! cargo run --bin coderoom-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use coderoom_server::ui::Server;
use coderoom_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "coderoom-server")]
#[command(about = "Coderoom relay server for collaborative code rooms", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Repository, MessagePusher and UseCases are wired inside the server
    let server = Server::with_in_memory_store(Arc::new(SystemClock));
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
