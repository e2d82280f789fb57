//! Identifier minting.

use uuid::Uuid;

use super::{
    error::ValueObjectError,
    value_object::{ConnectionId, RoomToken},
};

/// Mints unguessable room tokens (UUID v4, hyphenated).
pub struct RoomTokenFactory;

impl RoomTokenFactory {
    pub fn generate() -> Result<RoomToken, ValueObjectError> {
        RoomToken::new(Uuid::new_v4().to_string())
    }
}

/// Mints server-side connection ids.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> Result<ConnectionId, ValueObjectError> {
        ConnectionId::new(Uuid::new_v4().to_string())
    }
}
