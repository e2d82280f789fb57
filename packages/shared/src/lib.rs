//! Utilities shared by the Coderoom server and client.

pub mod logger;
pub mod time;
