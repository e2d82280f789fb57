//! Domain entities: connections and the rooms they belong to.

use std::collections::BTreeSet;

use super::value_object::{ConnectionId, RoomToken, Timestamp};

/// One participant's duplex channel as seen by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    /// Room the connection currently belongs to, if it has joined one
    pub room: Option<RoomToken>,
    pub connected_at: Timestamp,
}

impl Connection {
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            room: None,
            connected_at,
        }
    }
}

/// A collaboration scope: nothing but a token and its current members.
///
/// Rooms hold no document content. They exist while they have members and
/// are dropped by [`RoomDirectory`](super::RoomDirectory) once empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub token: RoomToken,
    pub members: BTreeSet<ConnectionId>,
}

impl Room {
    pub fn new(token: RoomToken) -> Self {
        Self {
            token,
            members: BTreeSet::new(),
        }
    }

    /// Returns `false` if the connection was already a member.
    pub fn add_member(&mut self, id: ConnectionId) -> bool {
        self.members.insert(id)
    }

    pub fn remove_member(&mut self, id: &ConnectionId) -> bool {
        self.members.remove(id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Owned copy of the member set, ordered by connection id.
    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.members.iter().cloned().collect()
    }
}
