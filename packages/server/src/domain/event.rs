//! Inbound and outbound relay events.

use super::value_object::{Language, RoomToken};

/// Events a connection can send to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Associate the sender with a room, leaving any previous one
    Join { room: RoomToken },
    /// Full buffer snapshot plus the active language
    CodeChange {
        room: Option<RoomToken>,
        code: String,
        lang: Language,
    },
    /// Language selection only
    LangChange {
        room: Option<RoomToken>,
        lang: Language,
    },
}

impl InboundEvent {
    /// Split a relayable event into its explicit target room and the event
    /// peers should observe. `Join` is not relayed and yields `None`.
    pub fn into_relay(self) -> Option<(Option<RoomToken>, OutboundEvent)> {
        match self {
            InboundEvent::Join { .. } => None,
            InboundEvent::CodeChange { room, code, lang } => {
                Some((room, OutboundEvent::CodeUpdate { code, lang }))
            }
            InboundEvent::LangChange { room, lang } => {
                Some((room, OutboundEvent::LangUpdate { lang }))
            }
        }
    }
}

/// Events the server fans out to room peers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    CodeUpdate { code: String, lang: Language },
    LangUpdate { lang: Language },
}

impl OutboundEvent {
    /// Wire name of the event, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundEvent::CodeUpdate { .. } => "code_update",
            OutboundEvent::LangUpdate { .. } => "lang_update",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_change_relays_as_code_update() {
        // テスト項目: code_change は code と lang を保ったまま code_update に変換される
        // given (前提条件):
        let room = RoomToken::new("abc123".to_string()).unwrap();
        let event = InboundEvent::CodeChange {
            room: Some(room.clone()),
            code: "print(1)".to_string(),
            lang: Language::new("python".to_string()),
        };

        // when (操作):
        let relay = event.into_relay();

        // then (期待する結果):
        assert_eq!(
            relay,
            Some((
                Some(room),
                OutboundEvent::CodeUpdate {
                    code: "print(1)".to_string(),
                    lang: Language::new("python".to_string()),
                }
            ))
        );
    }

    #[test]
    fn test_lang_change_relays_as_lang_update_only() {
        // テスト項目: lang_change は lang のみを持つ lang_update に変換される
        // given (前提条件):
        let event = InboundEvent::LangChange {
            room: None,
            lang: Language::new("javascript".to_string()),
        };

        // when (操作):
        let relay = event.into_relay();

        // then (期待する結果):
        let (room, outbound) = relay.unwrap();
        assert!(room.is_none());
        assert_eq!(outbound.kind(), "lang_update");
    }

    #[test]
    fn test_join_is_not_relayed() {
        // テスト項目: join はファンアウトの対象にならない
        // given (前提条件):
        let event = InboundEvent::Join {
            room: RoomToken::new("abc123".to_string()).unwrap(),
        };

        // when (操作):
        let relay = event.into_relay();

        // then (期待する結果):
        assert!(relay.is_none());
    }
}
