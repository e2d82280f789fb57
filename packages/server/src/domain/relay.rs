//! Fan-out rules.
//!
//! Pure functions over a [`RoomDirectory`]: no I/O, no locking. The caller
//! holds whatever lock guards the directory while routing, and holds it again
//! while re-checking the planned list with [`retain_current`] and pushing.

use super::{
    directory::RoomDirectory,
    event::OutboundEvent,
    value_object::{ConnectionId, RoomToken},
};

/// One outbound event addressed to one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub target: ConnectionId,
    /// Room the event was routed through
    pub room: RoomToken,
    pub event: OutboundEvent,
}

/// Resolve the room an event is meant for: the explicit room carried by the
/// event if any, otherwise the sender's current room.
pub fn resolve_room(
    source: &ConnectionId,
    explicit: Option<RoomToken>,
    directory: &RoomDirectory,
) -> Option<RoomToken> {
    explicit.or_else(|| directory.room_of(source).cloned())
}

/// Compute the deliveries for an event sent by `source`.
///
/// Every member of the resolved room except `source` receives a copy of
/// `event`. An unresolvable room yields no deliveries.
pub fn route(
    source: &ConnectionId,
    explicit_room: Option<RoomToken>,
    event: OutboundEvent,
    directory: &RoomDirectory,
) -> Vec<Delivery> {
    let Some(room) = resolve_room(source, explicit_room, directory) else {
        return Vec::new();
    };

    directory
        .members(&room)
        .into_iter()
        .filter(|member| member != source)
        .map(|target| Delivery {
            target,
            room: room.clone(),
            event: event.clone(),
        })
        .collect()
}

/// Drop deliveries whose target is no longer in the room the event was
/// routed through (it left, moved to another room, or disconnected).
///
/// Targets that are still members keep exactly one delivery each.
pub fn retain_current(deliveries: Vec<Delivery>, directory: &RoomDirectory) -> Vec<Delivery> {
    deliveries
        .into_iter()
        .filter(|delivery| directory.room_of(&delivery.target) == Some(&delivery.room))
        .collect()
}
