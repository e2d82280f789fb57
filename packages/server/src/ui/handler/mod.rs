//! Request handlers.

mod http;
mod websocket;

pub use http::{health_check, new_room, room_page};
pub use websocket::websocket_handler;
