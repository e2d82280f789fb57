//! UseCase layer: one struct per operation of the relay.

mod connect_participant;
mod create_room;
mod disconnect_participant;
mod error;
mod get_server_stats;
mod join_room;
mod relay_event;

pub use connect_participant::ConnectParticipantUseCase;
pub use create_room::CreateRoomUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ConnectError, CreateRoomError, DisconnectError, JoinRoomError};
pub use get_server_stats::{GetServerStatsUseCase, ServerStats};
pub use join_room::JoinRoomUseCase;
pub use relay_event::RelayEventUseCase;
