//! Infrastructure layer: wire DTOs, the in-memory directory and WebSocket delivery.

pub mod dto;
pub mod message_pusher;
pub mod repository;
