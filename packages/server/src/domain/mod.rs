//! Domain layer: rooms, connections and the relay rules between them.
//!
//! Everything here is transport agnostic. The UI layer converts WebSocket
//! frames into [`InboundEvent`]s and the infrastructure layer delivers the
//! resulting [`Delivery`] list.

pub mod directory;
pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod message_pusher;
pub mod relay;
pub mod repository;
pub mod value_object;

pub use directory::RoomDirectory;
pub use entity::{Connection, Room};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use event::{InboundEvent, OutboundEvent};
pub use factory::{ConnectionIdFactory, RoomTokenFactory};
pub use message_pusher::{MessagePusher, PusherChannel};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use relay::{Delivery, route};
pub use repository::RoomRepository;
pub use value_object::{ConnectionId, Language, RoomToken, Timestamp};
