//! Domain error types.

use thiserror::Error;

/// Value object construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("room token must not be empty")]
    EmptyRoomToken,

    #[error("connection id must not be empty")]
    EmptyConnectionId,
}

/// Repository access errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The connection was never registered or has already disconnected
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),

    /// A connection with the same id is already registered
    #[error("connection '{0}' is already registered")]
    DuplicateConnection(String),
}

/// Message delivery errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("failed to push message: {0}")]
    PushFailed(String),
}
