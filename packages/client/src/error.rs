//! Error types for the Coderoom client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server URL cannot be turned into a WebSocket URL
    #[error("Invalid server URL '{0}': expected http:// or https://")]
    InvalidUrl(String),

    /// Minting a room through `GET /new` failed
    #[error("Failed to create a room: {0}")]
    RoomCreation(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The connection dropped after being established
    #[error("Connection lost")]
    ConnectionLost,
}
