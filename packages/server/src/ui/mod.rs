//! Coderoom relay server: HTTP routes and the WebSocket gateway.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
