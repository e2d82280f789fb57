//! Terminal client for Coderoom.
//!
//! The [`synchronizer::Synchronizer`] holds the local buffer, debounces local
//! edits into full snapshots and applies snapshots relayed from peers.

pub mod debounce;
mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
pub mod synchronizer;
mod ui;

pub use domain::InputCommand;
pub use runner::{ClientConfig, run_client};
pub use session::run_client_session;
