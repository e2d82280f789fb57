//! Conversion logic between DTOs and domain events.

use crate::domain::{InboundEvent, Language, OutboundEvent, RoomToken, ValueObjectError};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain Event
// ========================================

/// An empty `room` on a relayed event counts as absent, so the sender's
/// joined room is used instead.
fn optional_room(room: Option<String>) -> Option<RoomToken> {
    room.and_then(|value| RoomToken::new(value).ok())
}

impl TryFrom<dto::ClientMessage> for InboundEvent {
    type Error = ValueObjectError;

    fn try_from(dto: dto::ClientMessage) -> Result<Self, Self::Error> {
        let event = match dto {
            dto::ClientMessage::Join { room } => InboundEvent::Join {
                room: RoomToken::new(room)?,
            },
            dto::ClientMessage::CodeChange { room, code, lang } => InboundEvent::CodeChange {
                room: optional_room(room),
                code,
                lang: Language::new(lang),
            },
            dto::ClientMessage::LangChange { room, lang } => InboundEvent::LangChange {
                room: optional_room(room),
                lang: Language::new(lang),
            },
        };
        Ok(event)
    }
}

// ========================================
// Domain Event → DTO
// ========================================

impl From<OutboundEvent> for dto::ServerMessage {
    fn from(event: OutboundEvent) -> Self {
        match event {
            OutboundEvent::CodeUpdate { code, lang } => Self::CodeUpdate {
                code,
                lang: lang.into_string(),
            },
            OutboundEvent::LangUpdate { lang } => Self::LangUpdate {
                lang: lang.into_string(),
            },
        }
    }
}
