//! UseCase error types.

use thiserror::Error;

use crate::domain::RepositoryError;

/// Connection registration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("failed to mint a connection id")]
    IdGenerationFailed,

    #[error("connection '{0}' is already registered")]
    DuplicateConnection(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// Room join errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// Disconnect errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// Room creation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateRoomError {
    #[error("failed to mint a room token")]
    TokenGenerationFailed,
}
