//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - ドメインの `OutboundEvent` を JSON にシリアライズして送信
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 配信対象の解決（どのルームの誰に送るか）は Repository が行い、
//! ここでは配信リストに従って送るだけです。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{
        ConnectionId, Delivery, MessagePushError, MessagePusher, OutboundEvent, PusherChannel,
    },
    infrastructure::dto::websocket::ServerMessage,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## フィールド
///
/// - `clients`: 接続中のクライアントと対応する WebSocket sender のマップ
pub struct WebSocketMessagePusher {
    /// Key: connection id, Value: PusherChannel
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

/// ドメインイベントを送信用の JSON 文字列に変換
pub fn encode(event: &OutboundEvent) -> Result<String, MessagePushError> {
    let message = ServerMessage::from(event.clone());
    serde_json::to_string(&message).map_err(|e| MessagePushError::PushFailed(e.to_string()))
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id.as_str());
        clients.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id.as_str()
        );
    }

    async fn deliver(&self, deliveries: Vec<Delivery>) -> usize {
        let clients = self.clients.lock().await;
        let mut delivered = 0;

        for Delivery { target, event, .. } in deliveries {
            // 配信時点で既に切断済みの接続はスキップ
            let Some(sender) = clients.get(&target) else {
                tracing::debug!(
                    "Connection '{}' left before delivery, skipping",
                    target.as_str()
                );
                continue;
            };

            let payload = match encode(&event) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::warn!("Failed to encode {}: {}", event.kind(), e);
                    continue;
                }
            };

            if let Err(e) = sender.send(payload) {
                tracing::warn!(
                    "Failed to push {} to connection '{}': {}",
                    event.kind(),
                    target.as_str(),
                    e
                );
            } else {
                delivered += 1;
            }
        }

        delivered
    }
}
