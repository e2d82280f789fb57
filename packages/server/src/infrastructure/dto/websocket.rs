//! WebSocket event DTOs.
//!
//! Every frame is a JSON object whose `type` field names the event, with the
//! payload fields flattened beside it:
//!
//! ```text
//! {"type":"join","room":"abc123"}
//! {"type":"code_change","room":"abc123","code":"print(1)","lang":"python"}
//! {"type":"lang_change","room":"abc123","lang":"python"}
//! {"type":"code_update","code":"print(1)","lang":"python"}
//! {"type":"lang_update","lang":"python"}
//! ```

use serde::{Deserialize, Serialize};

/// Client → server events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Join {
        room: String,
    },
    CodeChange {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room: Option<String>,
        code: String,
        lang: String,
    },
    LangChange {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room: Option<String>,
        lang: String,
    },
}

/// Server → client events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    CodeUpdate { code: String, lang: String },
    LangUpdate { lang: String },
}
