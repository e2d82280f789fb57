//! Room directory: the single registry mapping rooms to their members.
//!
//! The directory keeps both directions of the association so that a
//! disconnect can find the room to leave without scanning every room:
//!
//! - `connections`: connection id → [`Connection`] (with its current room)
//! - `rooms`: room token → [`Room`] (with its member set)
//!
//! Rooms are created on first join and removed as soon as their last member
//! leaves. Readers that need to iterate a member set get an owned snapshot
//! (see [`RoomDirectory::members`]) so that later mutations cannot affect an
//! in-progress fan-out.

use std::collections::HashMap;

use super::{
    entity::{Connection, Room},
    error::RepositoryError,
    value_object::{ConnectionId, RoomToken},
};

#[derive(Debug, Default)]
pub struct RoomDirectory {
    connections: HashMap<ConnectionId, Connection>,
    rooms: HashMap<RoomToken, Room>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly accepted connection. It starts outside any room.
    pub fn register(&mut self, connection: Connection) -> Result<(), RepositoryError> {
        if self.connections.contains_key(&connection.id) {
            return Err(RepositoryError::DuplicateConnection(
                connection.id.as_str().to_string(),
            ));
        }
        self.connections.insert(connection.id.clone(), connection);
        Ok(())
    }

    /// Associate `id` with `token`, leaving its previous room if different.
    ///
    /// Returns the room that was left, if any. Joining the room the
    /// connection is already in changes nothing and returns `None`.
    pub fn join(
        &mut self,
        id: &ConnectionId,
        token: RoomToken,
    ) -> Result<Option<RoomToken>, RepositoryError> {
        let connection = self
            .connections
            .get_mut(id)
            .ok_or_else(|| RepositoryError::ConnectionNotFound(id.as_str().to_string()))?;

        if connection.room.as_ref() == Some(&token) {
            return Ok(None);
        }

        let previous = connection.room.replace(token.clone());
        if let Some(previous) = &previous {
            Self::leave(&mut self.rooms, id, previous);
        }

        self.rooms
            .entry(token.clone())
            .or_insert_with(|| Room::new(token))
            .add_member(id.clone());

        Ok(previous)
    }

    /// Forget a connection and remove it from its room.
    pub fn disconnect(&mut self, id: &ConnectionId) -> Result<Connection, RepositoryError> {
        let connection = self
            .connections
            .remove(id)
            .ok_or_else(|| RepositoryError::ConnectionNotFound(id.as_str().to_string()))?;

        if let Some(room) = &connection.room {
            Self::leave(&mut self.rooms, id, room);
        }

        Ok(connection)
    }

    fn leave(rooms: &mut HashMap<RoomToken, Room>, id: &ConnectionId, token: &RoomToken) {
        let now_empty = match rooms.get_mut(token) {
            Some(room) => {
                room.remove_member(id);
                room.is_empty()
            }
            None => false,
        };
        if now_empty {
            rooms.remove(token);
        }
    }

    /// Room the connection currently belongs to.
    pub fn room_of(&self, id: &ConnectionId) -> Option<&RoomToken> {
        self.connections.get(id).and_then(|c| c.room.as_ref())
    }

    /// Snapshot of the members of `token`. Empty if the room does not exist.
    pub fn members(&self, token: &RoomToken) -> Vec<ConnectionId> {
        self.rooms
            .get(token)
            .map(Room::member_ids)
            .unwrap_or_default()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}
