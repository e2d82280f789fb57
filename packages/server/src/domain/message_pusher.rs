//! MessagePusher trait 定義
//!
//! 接続への通知（push）のインターフェース。
//! WebSocket などの具体的な送信手段は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, Delivery};

/// 接続ごとの送信チャンネル
///
/// 1 接続につき 1 本の FIFO チャンネルを使うため、同じ送信元からのイベントは
/// 送信された順序のまま各ピアに届く。
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを登録解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 配信リストに従ってイベントを送信し、実際に送信できた件数を返す
    ///
    /// 配信時点で登録解除済みの接続はスキップされる（部分失敗を許容）。
    async fn deliver(&self, deliveries: Vec<Delivery>) -> usize;
}
